use webgpu_boot_base::{
    adapter_features, create_instance, enumerate_adapters, inspect_adapter, request_adapter,
    request_adapter_immediate, request_adapter_sync,
    scripted::{Resolution, ScriptedAdapter, ScriptedBackend},
    surface_preferred_format, Backend, Error,
};
use webgpu_boot_core::{
    AdapterType, FeatureName, InstanceDescriptor, InstanceId, PowerPreference,
    RequestAdapterOptions, RequestAdapterStatus, TextureFormat,
};

fn two_gpus() -> Vec<ScriptedAdapter> {
    vec![
        ScriptedAdapter::new("Integrated", AdapterType::IntegratedGpu).with_features(&[
            FeatureName::DEPTH_CLIP_CONTROL,
            FeatureName::TEXTURE_COMPRESSION_BC,
        ]),
        ScriptedAdapter::new("Discrete", AdapterType::DiscreteGpu).with_features(&[
            FeatureName::TIMESTAMP_QUERY,
            FeatureName::SHADER_F16,
            FeatureName::PUSH_CONSTANTS,
            FeatureName(0x0003_0fff),
        ]),
    ]
}

#[test]
fn instance_then_adapter_then_features() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let adapter =
        request_adapter_sync(&backend, instance, &RequestAdapterOptions::default()).unwrap();
    assert!(!adapter.is_null());

    let features = adapter_features(&backend, adapter);
    assert_eq!(
        features,
        vec![
            FeatureName::DEPTH_CLIP_CONTROL,
            FeatureName::TEXTURE_COMPRESSION_BC
        ]
    );
    assert!(features
        .iter()
        .filter(|feature| !feature.is_native_extension())
        .all(|feature| feature.is_standard()));
}

#[test]
fn extension_features_are_reported_as_is() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let options = RequestAdapterOptions {
        power_preference: PowerPreference::HighPerformance,
        ..RequestAdapterOptions::default()
    };

    let adapter = request_adapter_immediate(&backend, instance, &options).unwrap();
    let features = adapter_features(&backend, adapter);

    assert_eq!(features.len(), 4);
    assert!(features.contains(&FeatureName(0x0003_0fff)));
    assert!(backend.adapter_has_feature(adapter, FeatureName::SHADER_F16));
    assert!(!backend.adapter_has_feature(adapter, FeatureName::DEPTH_CLIP_CONTROL));
}

#[test]
fn power_preference_picks_matching_adapter() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    for (preference, expected) in [
        (PowerPreference::HighPerformance, "Discrete"),
        (PowerPreference::LowPower, "Integrated"),
        (PowerPreference::Undefined, "Integrated"),
    ] {
        let options = RequestAdapterOptions {
            power_preference: preference,
            ..RequestAdapterOptions::default()
        };
        let adapter = request_adapter_sync(&backend, instance, &options).unwrap();

        assert_eq!(backend.adapter_info(adapter).unwrap().name, expected);
    }
}

#[test]
fn callback_fires_once_per_request() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    for _ in 0..3 {
        let _ = request_adapter_sync(&backend, instance, &RequestAdapterOptions::default());
    }
    let _ = request_adapter_sync(&backend, InstanceId::from_raw(999), &Default::default());

    assert_eq!(backend.requests_issued(), 4);
    assert_eq!(backend.callbacks_fired(), 4);
}

#[test]
fn repeated_requests_are_independent() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let options = RequestAdapterOptions::default();

    let first = request_adapter_sync(&backend, instance, &options).unwrap();
    let second = request_adapter_sync(&backend, instance, &options).unwrap();
    assert_ne!(first, second);
    assert_eq!(backend.live_adapters(), 2);

    backend.adapter_release(first);
    assert_eq!(backend.live_adapters(), 1);
    assert!(backend.adapter_info(first).is_none());
    assert_eq!(backend.adapter_info(second).unwrap().name, "Integrated");
}

#[test]
fn invalid_instance_reports_a_message() {
    let backend = ScriptedBackend::new(two_gpus());

    let outcome = request_adapter_sync(
        &backend,
        InstanceId::from_raw(0xdead),
        &RequestAdapterOptions::default(),
    );

    match outcome {
        Err(Error::RequestAdapter { status, message }) => {
            assert_ne!(status, RequestAdapterStatus::Success);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(backend.live_adapters(), 0);
}

#[test]
fn released_instance_is_invalid() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    backend.instance_release(instance);

    assert_eq!(backend.live_instances(), 0);
    assert!(request_adapter_sync(&backend, instance, &Default::default()).is_err());
}

#[test]
fn no_adapter_available() {
    let backend = ScriptedBackend::new(Vec::new());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    match request_adapter_sync(&backend, instance, &RequestAdapterOptions::default()) {
        Err(Error::RequestAdapter { status, message }) => {
            assert_eq!(status, RequestAdapterStatus::Unavailable);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn instance_creation_failure() {
    let backend = ScriptedBackend::new(two_gpus()).failing_instance_creation();

    assert_eq!(
        create_instance(&backend, &InstanceDescriptor::default()),
        Err(Error::InstanceCreation)
    );
}

#[test]
fn immediate_request_fails_loudly_when_deferred() {
    let backend = ScriptedBackend::new(two_gpus()).with_resolution(Resolution::Deferred);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let outcome = request_adapter_immediate(&backend, instance, &RequestAdapterOptions::default());
    assert_eq!(outcome, Err(Error::Unresolved));

    // The late answer has nobody left to receive it.
    assert_eq!(backend.resolve_pending(), 1);
    assert_eq!(backend.callbacks_fired(), 1);
    assert_eq!(backend.live_adapters(), 0);
}

#[test]
fn adapter_delivered_with_a_failure_is_released() {
    let backend = ScriptedBackend::new(Vec::new()).with_handle_on_failure();
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let outcome = request_adapter_sync(&backend, instance, &RequestAdapterOptions::default());

    assert!(matches!(
        outcome,
        Err(Error::RequestAdapter {
            status: RequestAdapterStatus::Unavailable,
            ..
        })
    ));
    assert_eq!(backend.callbacks_fired(), 1);
    assert_eq!(backend.live_adapters(), 0);
}

#[test]
fn awaited_request_survives_deferred_resolution() {
    let backend = ScriptedBackend::new(two_gpus()).with_resolution(Resolution::Deferred);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let request = request_adapter(&backend, instance, &RequestAdapterOptions::default());
    assert_eq!(backend.callbacks_fired(), 0);
    assert_eq!(backend.resolve_pending(), 1);

    let adapter = futures::executor::block_on(request).unwrap();
    assert_eq!(backend.adapter_info(adapter).unwrap().name, "Integrated");
}

#[test]
fn blocking_request_waits_for_another_thread() {
    let backend = ScriptedBackend::new(two_gpus()).with_resolution(Resolution::Threaded);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let adapter =
        request_adapter_sync(&backend, instance, &RequestAdapterOptions::default()).unwrap();

    assert!(!adapter.is_null());
    assert_eq!(backend.callbacks_fired(), 1);
}

#[test]
fn dropped_callback_is_reported() {
    let backend = ScriptedBackend::new(two_gpus()).with_resolution(Resolution::Dropped);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let options = RequestAdapterOptions::default();

    assert_eq!(
        request_adapter_sync(&backend, instance, &options),
        Err(Error::CallbackDropped)
    );
    assert_eq!(
        request_adapter_immediate(&backend, instance, &options),
        Err(Error::CallbackDropped)
    );
}

#[test]
fn surface_restricts_adapter_choice() {
    let adapters = vec![
        ScriptedAdapter::new("Headless", AdapterType::DiscreteGpu).with_surface_formats(&[]),
        ScriptedAdapter::new("Presenting", AdapterType::IntegratedGpu)
            .with_surface_formats(&[TextureFormat::Rgba8UnormSrgb, TextureFormat::Rgba8Unorm]),
    ];
    let backend = ScriptedBackend::new(adapters);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let surface = backend.create_surface(instance).unwrap();
    let options = RequestAdapterOptions {
        compatible_surface: Some(surface),
        power_preference: PowerPreference::HighPerformance,
        ..RequestAdapterOptions::default()
    };

    let adapter = request_adapter_sync(&backend, instance, &options).unwrap();

    assert_eq!(backend.adapter_info(adapter).unwrap().name, "Presenting");
    assert_eq!(
        surface_preferred_format(&backend, surface, adapter),
        Some(TextureFormat::Rgba8UnormSrgb)
    );

    backend.surface_release(surface);
    assert_eq!(surface_preferred_format(&backend, surface, adapter), None);
}

#[test]
fn surface_from_another_instance_is_rejected() {
    let backend = ScriptedBackend::new(two_gpus());
    let first = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let second = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let surface = backend.create_surface(first).unwrap();
    let options = RequestAdapterOptions {
        compatible_surface: Some(surface),
        ..RequestAdapterOptions::default()
    };

    assert!(request_adapter_sync(&backend, second, &options).is_err());
    assert!(request_adapter_sync(&backend, first, &options).is_ok());
}

#[test]
fn fallback_adapter_must_be_cpu() {
    let mut adapters = two_gpus();
    let backend = ScriptedBackend::new(adapters.clone());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let options = RequestAdapterOptions {
        force_fallback_adapter: true,
        ..RequestAdapterOptions::default()
    };
    assert!(request_adapter_sync(&backend, instance, &options).is_err());

    adapters.push(ScriptedAdapter::new("Software", AdapterType::Cpu));
    let backend = ScriptedBackend::new(adapters);
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();
    let adapter = request_adapter_sync(&backend, instance, &options).unwrap();
    assert_eq!(backend.adapter_info(adapter).unwrap().name, "Software");
}

#[test]
fn enumerate_and_inspect_every_adapter() {
    let backend = ScriptedBackend::new(two_gpus());
    let instance = create_instance(&backend, &InstanceDescriptor::default()).unwrap();

    let adapters = enumerate_adapters(&backend, instance);
    assert_eq!(adapters.len(), 2);
    assert!(adapters.iter().all(|adapter| !adapter.is_null()));

    let report = inspect_adapter(&backend, adapters[1]).unwrap();
    assert_eq!(report.info.name, "Discrete");
    assert_eq!(report.features.len(), 4);

    let listing = report.to_string();
    assert!(listing.starts_with("Adapter properties:\n"));
    assert!(listing.contains(" - name: Discrete\n"));
    assert!(listing.contains(" - 0x3 (TimestampQuery)\n"));
    assert!(listing.contains(" - 0x30fff\n"));
}

#[test]
fn inspecting_unknown_adapter_fails() {
    let backend = ScriptedBackend::new(two_gpus());

    assert!(matches!(
        inspect_adapter(&backend, webgpu_boot_core::AdapterId::from_raw(42)),
        Err(Error::InvalidHandle(_))
    ));
    assert!(adapter_features(&backend, webgpu_boot_core::AdapterId::from_raw(42)).is_empty());
}
