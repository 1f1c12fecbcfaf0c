//! Lists every adapter the environment exposes, then the one picked by
//! default, without opening a window.

use anyhow::Result;
use webgpu_boot_base::{
    create_instance, enumerate_adapters, inspect_adapter, request_adapter_immediate, Backend,
};
use webgpu_boot_core::{InstanceDescriptor, RequestAdapterOptions};
use webgpu_boot_wgpu::{WgpuBackend, IMPLEMENTATION};

fn main() -> Result<()> {
    env_logger::init();

    let backend = WgpuBackend::new();
    let instance = create_instance(&backend, &InstanceDescriptor::from_env())?;

    println!("Implementation: {:?}", IMPLEMENTATION);

    let adapters = enumerate_adapters(&backend, instance);
    println!("Found {} adapter(s)", adapters.len());

    for (index, adapter) in adapters.into_iter().enumerate() {
        println!("== Adapter #{}", index);
        print!("{}", inspect_adapter(&backend, adapter)?);
        backend.adapter_release(adapter);
    }

    let adapter =
        request_adapter_immediate(&backend, instance, &RequestAdapterOptions::from_env())?;
    let report = inspect_adapter(&backend, adapter)?;
    println!("== Default adapter: {}", report.info.name);

    backend.adapter_release(adapter);
    backend.instance_release(instance);

    Ok(())
}
