use crate::BackendType;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdapterType {
    DiscreteGpu,
    IntegratedGpu,
    Cpu,
    #[default]
    Unknown,
}

/// Properties reported by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterInfo {
    pub vendor_id: u32,
    pub device_id: u32,
    pub name: String,
    pub driver_description: String,
    pub adapter_type: AdapterType,
    pub backend_type: BackendType,
}

/// The commonly inspected subset of adapter limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_texture_dimension_1d: u32,
    pub max_texture_dimension_2d: u32,
    pub max_texture_dimension_3d: u32,
    pub max_texture_array_layers: u32,
    pub max_bind_groups: u32,
    pub max_bindings_per_bind_group: u32,
    pub max_uniform_buffer_binding_size: u32,
    pub max_storage_buffer_binding_size: u32,
    pub max_buffer_size: u64,
    pub max_vertex_buffers: u32,
    pub max_vertex_attributes: u32,
    pub max_compute_workgroup_size_x: u32,
    pub max_compute_workgroup_size_y: u32,
    pub max_compute_workgroup_size_z: u32,
    pub max_compute_invocations_per_workgroup: u32,
    pub max_compute_workgroups_per_dimension: u32,
}

impl Limits {
    /// Limits every conforming WebGPU adapter supports.
    pub const fn webgpu_defaults() -> Self {
        Self {
            max_texture_dimension_1d: 8192,
            max_texture_dimension_2d: 8192,
            max_texture_dimension_3d: 2048,
            max_texture_array_layers: 256,
            max_bind_groups: 4,
            max_bindings_per_bind_group: 1000,
            max_uniform_buffer_binding_size: 64 << 10,
            max_storage_buffer_binding_size: 128 << 20,
            max_buffer_size: 256 << 20,
            max_vertex_buffers: 8,
            max_vertex_attributes: 16,
            max_compute_workgroup_size_x: 256,
            max_compute_workgroup_size_y: 256,
            max_compute_workgroup_size_z: 64,
            max_compute_invocations_per_workgroup: 256,
            max_compute_workgroups_per_dimension: 65535,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: [(&str, u64); 16] = [
            ("maxTextureDimension1D", self.max_texture_dimension_1d.into()),
            ("maxTextureDimension2D", self.max_texture_dimension_2d.into()),
            ("maxTextureDimension3D", self.max_texture_dimension_3d.into()),
            ("maxTextureArrayLayers", self.max_texture_array_layers.into()),
            ("maxBindGroups", self.max_bind_groups.into()),
            (
                "maxBindingsPerBindGroup",
                self.max_bindings_per_bind_group.into(),
            ),
            (
                "maxUniformBufferBindingSize",
                self.max_uniform_buffer_binding_size.into(),
            ),
            (
                "maxStorageBufferBindingSize",
                self.max_storage_buffer_binding_size.into(),
            ),
            ("maxBufferSize", self.max_buffer_size),
            ("maxVertexBuffers", self.max_vertex_buffers.into()),
            ("maxVertexAttributes", self.max_vertex_attributes.into()),
            (
                "maxComputeWorkgroupSizeX",
                self.max_compute_workgroup_size_x.into(),
            ),
            (
                "maxComputeWorkgroupSizeY",
                self.max_compute_workgroup_size_y.into(),
            ),
            (
                "maxComputeWorkgroupSizeZ",
                self.max_compute_workgroup_size_z.into(),
            ),
            (
                "maxComputeInvocationsPerWorkgroup",
                self.max_compute_invocations_per_workgroup.into(),
            ),
            (
                "maxComputeWorkgroupsPerDimension",
                self.max_compute_workgroups_per_dimension.into(),
            ),
        ];

        for (name, value) in rows {
            writeln!(f, " - {}: {}", name, value)?;
        }

        Ok(())
    }
}

/// Which WebGPU implementation a binary is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// The Rust implementation, linked natively.
    Wgpu,
    /// Google's C++ implementation.
    Dawn,
    /// The browser's implementation, reached from wasm.
    Web,
}
