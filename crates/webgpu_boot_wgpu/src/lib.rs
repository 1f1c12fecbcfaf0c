mod backend;
mod bootstrap;
mod convert;
#[cfg(target_arch = "wasm32")]
mod web;

pub use backend::WgpuBackend;
pub use bootstrap::Bootstrap;
pub use webgpu_boot_base::{
    adapter_features, create_instance, enumerate_adapters, inspect_adapter, request_adapter,
    request_adapter_immediate, request_adapter_sync, AdapterReport, Backend, Error,
};

use webgpu_boot_core::Implementation;

/// The WebGPU implementation this build talks to.
#[cfg(target_arch = "wasm32")]
pub const IMPLEMENTATION: Implementation = Implementation::Web;
/// The WebGPU implementation this build talks to.
#[cfg(not(target_arch = "wasm32"))]
pub const IMPLEMENTATION: Implementation = Implementation::Wgpu;
