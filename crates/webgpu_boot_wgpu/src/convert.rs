use webgpu_boot_core::{
    AdapterInfo, AdapterType, BackendType, FeatureName, Limits, PowerPreference, TextureFormat,
};

const FEATURES: &[(wgpu::Features, FeatureName)] = &[
    (wgpu::Features::DEPTH_CLIP_CONTROL, FeatureName::DEPTH_CLIP_CONTROL),
    (
        wgpu::Features::DEPTH32FLOAT_STENCIL8,
        FeatureName::DEPTH32_FLOAT_STENCIL8,
    ),
    (wgpu::Features::TIMESTAMP_QUERY, FeatureName::TIMESTAMP_QUERY),
    (
        wgpu::Features::TEXTURE_COMPRESSION_BC,
        FeatureName::TEXTURE_COMPRESSION_BC,
    ),
    (
        wgpu::Features::TEXTURE_COMPRESSION_ETC2,
        FeatureName::TEXTURE_COMPRESSION_ETC2,
    ),
    (
        wgpu::Features::TEXTURE_COMPRESSION_ASTC,
        FeatureName::TEXTURE_COMPRESSION_ASTC,
    ),
    (
        wgpu::Features::INDIRECT_FIRST_INSTANCE,
        FeatureName::INDIRECT_FIRST_INSTANCE,
    ),
    (wgpu::Features::SHADER_F16, FeatureName::SHADER_F16),
    (
        wgpu::Features::RG11B10UFLOAT_RENDERABLE,
        FeatureName::RG11B10_UFLOAT_RENDERABLE,
    ),
    (
        wgpu::Features::BGRA8UNORM_STORAGE,
        FeatureName::BGRA8_UNORM_STORAGE,
    ),
    (
        wgpu::Features::FLOAT32_FILTERABLE,
        FeatureName::FLOAT32_FILTERABLE,
    ),
    (wgpu::Features::PUSH_CONSTANTS, FeatureName::PUSH_CONSTANTS),
    (
        wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES,
        FeatureName::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES,
    ),
    (
        wgpu::Features::MULTI_DRAW_INDIRECT,
        FeatureName::MULTI_DRAW_INDIRECT,
    ),
    (
        wgpu::Features::MULTI_DRAW_INDIRECT_COUNT,
        FeatureName::MULTI_DRAW_INDIRECT_COUNT,
    ),
    (
        wgpu::Features::VERTEX_WRITABLE_STORAGE,
        FeatureName::VERTEX_WRITABLE_STORAGE,
    ),
    (
        wgpu::Features::TEXTURE_BINDING_ARRAY,
        FeatureName::TEXTURE_BINDING_ARRAY,
    ),
    (
        wgpu::Features::SAMPLED_TEXTURE_AND_STORAGE_BUFFER_ARRAY_NON_UNIFORM_INDEXING,
        FeatureName::SAMPLED_TEXTURE_AND_STORAGE_BUFFER_ARRAY_NON_UNIFORM_INDEXING,
    ),
    (
        wgpu::Features::PIPELINE_STATISTICS_QUERY,
        FeatureName::PIPELINE_STATISTICS_QUERY,
    ),
    (
        wgpu::Features::STORAGE_RESOURCE_BINDING_ARRAY,
        FeatureName::STORAGE_RESOURCE_BINDING_ARRAY,
    ),
    (
        wgpu::Features::PARTIALLY_BOUND_BINDING_ARRAY,
        FeatureName::PARTIALLY_BOUND_BINDING_ARRAY,
    ),
];

/// Identifiers of wgpu flags without a named counterpart start here, offset
/// by the flag's bit index.
pub const UNNAMED_FEATURE_BASE: u32 = FeatureName::NATIVE_BASE + 0x100;

/// Lists `features` as identifiers, standard ones first.
///
/// Every flag yields one identifier. Flags without a named counterpart are
/// reported as `UNNAMED_FEATURE_BASE + bit index`.
pub fn features(features: wgpu::Features) -> Vec<FeatureName> {
    let mut names: Vec<FeatureName> = FEATURES
        .iter()
        .filter(|(flag, _)| features.contains(*flag))
        .map(|(_, name)| *name)
        .collect();

    let unnamed = FEATURES
        .iter()
        .fold(features, |rest, (flag, _)| rest - *flag)
        .bits();

    names.extend(
        (0..u64::BITS)
            .filter(|bit| unnamed & (1u64 << bit) != 0)
            .map(|bit| FeatureName(UNNAMED_FEATURE_BASE + bit)),
    );

    names
}

/// Backends to enable for an instance. An empty list enables every backend.
pub fn backends(backends: &[BackendType]) -> wgpu::Backends {
    if backends.is_empty() {
        return wgpu::Backends::all();
    }

    backends
        .iter()
        .fold(wgpu::Backends::empty(), |bits, backend| {
            bits | match backend {
                BackendType::Null => wgpu::Backends::empty(),
                BackendType::WebGpu => wgpu::Backends::BROWSER_WEBGPU,
                BackendType::D3d12 => wgpu::Backends::DX12,
                BackendType::Metal => wgpu::Backends::METAL,
                BackendType::Vulkan => wgpu::Backends::VULKAN,
                BackendType::OpenGl | BackendType::OpenGlEs => wgpu::Backends::GL,
            }
        })
}

pub fn power_preference(preference: PowerPreference) -> wgpu::PowerPreference {
    match preference {
        PowerPreference::Undefined => wgpu::PowerPreference::None,
        PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
        PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
    }
}

pub fn adapter_info(info: wgpu::AdapterInfo) -> AdapterInfo {
    #[allow(unreachable_patterns)]
    let backend_type = match info.backend {
        wgpu::Backend::Vulkan => BackendType::Vulkan,
        wgpu::Backend::Metal => BackendType::Metal,
        wgpu::Backend::Dx12 => BackendType::D3d12,
        wgpu::Backend::Gl => BackendType::OpenGlEs,
        wgpu::Backend::BrowserWebGpu => BackendType::WebGpu,
        _ => BackendType::Null,
    };

    let adapter_type = match info.device_type {
        wgpu::DeviceType::DiscreteGpu => AdapterType::DiscreteGpu,
        wgpu::DeviceType::IntegratedGpu => AdapterType::IntegratedGpu,
        wgpu::DeviceType::Cpu => AdapterType::Cpu,
        wgpu::DeviceType::VirtualGpu | wgpu::DeviceType::Other => AdapterType::Unknown,
    };

    let driver_description = match (info.driver.is_empty(), info.driver_info.is_empty()) {
        (false, false) => format!("{} {}", info.driver, info.driver_info),
        (false, true) => info.driver,
        (true, _) => info.driver_info,
    };

    AdapterInfo {
        vendor_id: info.vendor,
        device_id: info.device,
        name: info.name,
        driver_description,
        adapter_type,
        backend_type,
    }
}

pub fn limits(limits: &wgpu::Limits) -> Limits {
    Limits {
        max_texture_dimension_1d: limits.max_texture_dimension_1d,
        max_texture_dimension_2d: limits.max_texture_dimension_2d,
        max_texture_dimension_3d: limits.max_texture_dimension_3d,
        max_texture_array_layers: limits.max_texture_array_layers,
        max_bind_groups: limits.max_bind_groups,
        max_bindings_per_bind_group: limits.max_bindings_per_bind_group,
        max_uniform_buffer_binding_size: limits.max_uniform_buffer_binding_size,
        max_storage_buffer_binding_size: limits.max_storage_buffer_binding_size,
        max_buffer_size: limits.max_buffer_size,
        max_vertex_buffers: limits.max_vertex_buffers,
        max_vertex_attributes: limits.max_vertex_attributes,
        max_compute_workgroup_size_x: limits.max_compute_workgroup_size_x,
        max_compute_workgroup_size_y: limits.max_compute_workgroup_size_y,
        max_compute_workgroup_size_z: limits.max_compute_workgroup_size_z,
        max_compute_invocations_per_workgroup: limits.max_compute_invocations_per_workgroup,
        max_compute_workgroups_per_dimension: limits.max_compute_workgroups_per_dimension,
    }
}

pub fn texture_format(format: wgpu::TextureFormat) -> TextureFormat {
    match format {
        wgpu::TextureFormat::Rgba8Unorm => TextureFormat::Rgba8Unorm,
        wgpu::TextureFormat::Rgba8UnormSrgb => TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureFormat::Bgra8Unorm => TextureFormat::Bgra8Unorm,
        wgpu::TextureFormat::Bgra8UnormSrgb => TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgb10a2Unorm => TextureFormat::Rgb10a2Unorm,
        wgpu::TextureFormat::Rgba16Float => TextureFormat::Rgba16Float,
        _ => TextureFormat::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_features_keep_table_order() {
        let flags = wgpu::Features::PUSH_CONSTANTS
            | wgpu::Features::DEPTH_CLIP_CONTROL
            | wgpu::Features::SHADER_F16;

        assert_eq!(
            features(flags),
            vec![
                FeatureName::DEPTH_CLIP_CONTROL,
                FeatureName::SHADER_F16,
                FeatureName::PUSH_CONSTANTS
            ]
        );
    }

    #[test]
    fn feature_table_has_no_undefined_entry() {
        let names = features(wgpu::Features::all());

        assert!(names.iter().all(|name| *name != FeatureName::UNDEFINED));
    }

    #[test]
    fn every_flag_gets_an_identifier() {
        let all = wgpu::Features::all();
        let names = features(all);

        assert_eq!(names.len(), all.bits().count_ones() as usize);

        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn unnamed_flag_uses_its_bit_index() {
        let flag = wgpu::Features::SHADER_PRIMITIVE_INDEX;
        let bit = flag.bits().trailing_zeros();

        assert_eq!(
            features(flag),
            vec![FeatureName(UNNAMED_FEATURE_BASE + bit)]
        );
        assert!(features(flag)[0].is_native_extension());
    }

    #[test]
    fn backend_bits() {
        assert_eq!(backends(&[]), wgpu::Backends::all());
        assert_eq!(backends(&[BackendType::Null]), wgpu::Backends::empty());
        assert_eq!(
            backends(&[BackendType::Vulkan, BackendType::OpenGlEs]),
            wgpu::Backends::VULKAN | wgpu::Backends::GL
        );
    }

    #[test]
    fn info_fields() {
        let info = adapter_info(wgpu::AdapterInfo {
            name: "Test GPU".to_owned(),
            vendor: 0x10de,
            device: 0x2204,
            device_type: wgpu::DeviceType::DiscreteGpu,
            driver: "test".to_owned(),
            driver_info: "1.0".to_owned(),
            backend: wgpu::Backend::Vulkan,
        });

        assert_eq!(info.vendor_id, 0x10de);
        assert_eq!(info.name, "Test GPU");
        assert_eq!(info.driver_description, "test 1.0");
        assert_eq!(info.adapter_type, AdapterType::DiscreteGpu);
        assert_eq!(info.backend_type, BackendType::Vulkan);
    }

    #[test]
    fn default_limits_match() {
        let converted = limits(&wgpu::Limits::default());

        assert_eq!(converted.max_bind_groups, 4);
        assert_eq!(converted.max_texture_dimension_2d, 8192);
    }
}
