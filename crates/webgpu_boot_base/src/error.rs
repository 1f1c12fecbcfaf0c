use std::fmt;
use webgpu_boot_core::RequestAdapterStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backend returned an empty instance handle.
    InstanceCreation,
    /// The adapter request callback reported a failure.
    RequestAdapter {
        status: RequestAdapterStatus,
        message: String,
    },
    /// The request had not resolved when it was required to.
    Unresolved,
    /// The backend dropped the request callback without calling it.
    CallbackDropped,
    /// A handle did not refer to a live object.
    InvalidHandle(String),
    SurfaceCreation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InstanceCreation => write!(f, "Could not initialize WebGPU instance"),
            Error::RequestAdapter { status, message } => {
                write!(f, "Could not get WebGPU adapter ({}): {}", status, message)
            }
            Error::Unresolved => write!(
                f,
                "Adapter request did not resolve before the request call returned"
            ),
            Error::CallbackDropped => {
                write!(f, "Adapter request callback was dropped without being called")
            }
            Error::InvalidHandle(handle) => write!(f, "Invalid handle: {}", handle),
            Error::SurfaceCreation(msg) => write!(f, "Could not create surface: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
