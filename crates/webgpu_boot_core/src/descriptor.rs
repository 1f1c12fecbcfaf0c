use crate::SurfaceId;
use std::{fmt, str::FromStr};

/// The graphics API an adapter is implemented on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendType {
    #[default]
    Null,
    WebGpu,
    D3d12,
    Metal,
    Vulkan,
    OpenGl,
    OpenGlEs,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::WebGpu => "webgpu",
            Self::D3d12 => "dx12",
            Self::Metal => "metal",
            Self::Vulkan => "vulkan",
            Self::OpenGl => "gl",
            Self::OpenGlEs => "gles",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vulkan" | "vk" => Ok(Self::Vulkan),
            "metal" | "mtl" => Ok(Self::Metal),
            "dx12" | "d3d12" => Ok(Self::D3d12),
            "gl" | "opengl" => Ok(Self::OpenGl),
            "gles" | "opengles" => Ok(Self::OpenGlEs),
            "webgpu" | "browser" => Ok(Self::WebGpu),
            "null" | "noop" => Ok(Self::Null),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Options for creating an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceDescriptor {
    /// Debug label of the instance.
    pub label: Option<String>,
    /// Backends the instance may use. Empty means every backend available.
    pub backends: Vec<BackendType>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PowerPreference {
    #[default]
    Undefined,
    LowPower,
    HighPerformance,
}

/// Options for requesting an adapter from an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestAdapterOptions {
    /// Only adapters able to present to this surface are considered.
    pub compatible_surface: Option<SurfaceId>,
    pub power_preference: PowerPreference,
    pub force_fallback_adapter: bool,
}

/// Status reported to an adapter request callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestAdapterStatus {
    Success,
    Unavailable,
    Error,
    Unknown,
}

impl RequestAdapterStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Message used when a backend reports a failure without one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Success => "adapter request succeeded",
            Self::Unavailable => "no adapter satisfies the requested options",
            Self::Error => "adapter request failed",
            Self::Unknown => "adapter request ended with an unknown status",
        }
    }
}

impl fmt::Display for RequestAdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
