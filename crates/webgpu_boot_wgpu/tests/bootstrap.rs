use webgpu_boot_wgpu::{
    create_instance, request_adapter, Backend, Bootstrap, Error, WgpuBackend,
};
use webgpu_boot_core::{InstanceDescriptor, RequestAdapterOptions};

// Machines without a usable adapter still have to resolve with an error
// instead of panicking inside the executor.

#[test]
fn headless_bootstrap_resolves_inside_an_executor() {
    match futures::executor::block_on(Bootstrap::headless()) {
        Ok(bootstrap) => {
            assert!(!bootstrap.adapter().is_null());
            assert!(bootstrap.surface().is_none());
            assert!(bootstrap.report().is_ok());
        }
        Err(err) => {
            let err = err
                .downcast_ref::<Error>()
                .expect("bootstrap failures carry the library error");
            assert!(!err.to_string().is_empty());
        }
    }
}

#[test]
fn awaited_request_resolves_inside_an_executor() {
    let backend = WgpuBackend::new();
    let Ok(instance) = create_instance(&backend, &InstanceDescriptor::default()) else {
        return;
    };

    let options = RequestAdapterOptions::default();
    let result = futures::executor::block_on(async {
        request_adapter(&backend, instance, &options).await
    });

    match result {
        Ok(adapter) => {
            assert!(!adapter.is_null());
            backend.adapter_release(adapter);
        }
        Err(Error::RequestAdapter { message, .. }) => assert!(!message.is_empty()),
        Err(err) => panic!("unexpected error: {err}"),
    }

    backend.instance_release(instance);
}
