mod adapter;
mod backend;
mod error;
mod instance;
mod report;
#[cfg(feature = "scripted")]
pub mod scripted;

pub use adapter::{request_adapter, request_adapter_immediate, request_adapter_sync};
pub use backend::{AdapterReleaser, Backend, RequestAdapterCallback};
pub use error::{Error, Result};
pub use instance::{create_instance, enumerate_adapters};
pub use report::{
    adapter_features, inspect_adapter, surface_formats, surface_preferred_format, AdapterReport,
};
