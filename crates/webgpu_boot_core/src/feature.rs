use std::fmt;

/// Identifier of an optional adapter capability.
///
/// Standard identifiers follow the WebGPU header numbering. Native extensions
/// start at [`FeatureName::NATIVE_BASE`], and backends may report values this
/// crate has no name for.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureName(pub u32);

impl FeatureName {
    pub const UNDEFINED: Self = Self(0x0000_0000);
    pub const DEPTH_CLIP_CONTROL: Self = Self(0x0000_0001);
    pub const DEPTH32_FLOAT_STENCIL8: Self = Self(0x0000_0002);
    pub const TIMESTAMP_QUERY: Self = Self(0x0000_0003);
    pub const TEXTURE_COMPRESSION_BC: Self = Self(0x0000_0004);
    pub const TEXTURE_COMPRESSION_ETC2: Self = Self(0x0000_0005);
    pub const TEXTURE_COMPRESSION_ASTC: Self = Self(0x0000_0006);
    pub const INDIRECT_FIRST_INSTANCE: Self = Self(0x0000_0007);
    pub const SHADER_F16: Self = Self(0x0000_0008);
    pub const RG11B10_UFLOAT_RENDERABLE: Self = Self(0x0000_0009);
    pub const BGRA8_UNORM_STORAGE: Self = Self(0x0000_000A);
    pub const FLOAT32_FILTERABLE: Self = Self(0x0000_000B);

    pub const NATIVE_BASE: u32 = 0x0003_0000;

    pub const PUSH_CONSTANTS: Self = Self(0x0003_0001);
    pub const TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES: Self = Self(0x0003_0002);
    pub const MULTI_DRAW_INDIRECT: Self = Self(0x0003_0003);
    pub const MULTI_DRAW_INDIRECT_COUNT: Self = Self(0x0003_0004);
    pub const VERTEX_WRITABLE_STORAGE: Self = Self(0x0003_0005);
    pub const TEXTURE_BINDING_ARRAY: Self = Self(0x0003_0006);
    pub const SAMPLED_TEXTURE_AND_STORAGE_BUFFER_ARRAY_NON_UNIFORM_INDEXING: Self =
        Self(0x0003_0007);
    pub const PIPELINE_STATISTICS_QUERY: Self = Self(0x0003_0008);
    pub const STORAGE_RESOURCE_BINDING_ARRAY: Self = Self(0x0003_0009);
    pub const PARTIALLY_BOUND_BINDING_ARRAY: Self = Self(0x0003_000A);

    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::DEPTH_CLIP_CONTROL, "DepthClipControl"),
        (Self::DEPTH32_FLOAT_STENCIL8, "Depth32FloatStencil8"),
        (Self::TIMESTAMP_QUERY, "TimestampQuery"),
        (Self::TEXTURE_COMPRESSION_BC, "TextureCompressionBC"),
        (Self::TEXTURE_COMPRESSION_ETC2, "TextureCompressionETC2"),
        (Self::TEXTURE_COMPRESSION_ASTC, "TextureCompressionASTC"),
        (Self::INDIRECT_FIRST_INSTANCE, "IndirectFirstInstance"),
        (Self::SHADER_F16, "ShaderF16"),
        (Self::RG11B10_UFLOAT_RENDERABLE, "RG11B10UfloatRenderable"),
        (Self::BGRA8_UNORM_STORAGE, "BGRA8UnormStorage"),
        (Self::FLOAT32_FILTERABLE, "Float32Filterable"),
        (Self::PUSH_CONSTANTS, "PushConstants"),
        (
            Self::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES,
            "TextureAdapterSpecificFormatFeatures",
        ),
        (Self::MULTI_DRAW_INDIRECT, "MultiDrawIndirect"),
        (Self::MULTI_DRAW_INDIRECT_COUNT, "MultiDrawIndirectCount"),
        (Self::VERTEX_WRITABLE_STORAGE, "VertexWritableStorage"),
        (Self::TEXTURE_BINDING_ARRAY, "TextureBindingArray"),
        (
            Self::SAMPLED_TEXTURE_AND_STORAGE_BUFFER_ARRAY_NON_UNIFORM_INDEXING,
            "SampledTextureAndStorageBufferArrayNonUniformIndexing",
        ),
        (Self::PIPELINE_STATISTICS_QUERY, "PipelineStatisticsQuery"),
        (Self::STORAGE_RESOURCE_BINDING_ARRAY, "StorageResourceBindingArray"),
        (Self::PARTIALLY_BOUND_BINDING_ARRAY, "PartiallyBoundBindingArray"),
    ];

    /// Returns the known name of this feature, if any.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(feature, _)| *feature == self)
            .map(|(_, name)| *name)
    }

    /// Whether this is a non-empty identifier of the standard range.
    pub fn is_standard(self) -> bool {
        self.0 != 0 && self.0 < Self::NATIVE_BASE
    }

    pub fn is_native_extension(self) -> bool {
        self.0 >= Self::NATIVE_BASE
    }
}

impl fmt::Debug for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "FeatureName({:#x})", self.0),
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{:#x} ({})", self.0, name),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

/// Texture formats a surface may be configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    #[default]
    Undefined,
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Bgra8UnormSrgb,
    Rgb10a2Unorm,
    Rgba16Float,
    /// A format without a counterpart in this enum.
    Other,
}

impl TextureFormat {
    pub fn is_srgb(self) -> bool {
        matches!(self, Self::Rgba8UnormSrgb | Self::Bgra8UnormSrgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_range() {
        assert!(!FeatureName::UNDEFINED.is_standard());
        assert!(FeatureName::DEPTH_CLIP_CONTROL.is_standard());
        assert!(FeatureName::FLOAT32_FILTERABLE.is_standard());
        assert!(!FeatureName::PUSH_CONSTANTS.is_standard());
        assert!(FeatureName::PUSH_CONSTANTS.is_native_extension());
    }

    #[test]
    fn display_known_and_unknown() {
        assert_eq!(FeatureName::SHADER_F16.to_string(), "0x8 (ShaderF16)");
        assert_eq!(FeatureName(0x0003_00ff).to_string(), "0x300ff");
        assert_eq!(format!("{:?}", FeatureName(0x42)), "FeatureName(0x42)");
    }

    #[test]
    fn every_named_feature_is_unique() {
        let mut values: Vec<u32> = FeatureName::NAMES.iter().map(|(f, _)| f.0).collect();
        let len = values.len();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), len);
    }
}
