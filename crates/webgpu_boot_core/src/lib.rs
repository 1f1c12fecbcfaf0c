mod config;
mod descriptor;
mod enumerate;
mod feature;
mod handle;
mod info;

pub use config::{
    parse_backends, parse_flag, parse_power_preference, BACKEND_VAR, FORCE_FALLBACK_ADAPTER_VAR,
    POWER_PREFERENCE_VAR,
};
pub use descriptor::{
    BackendType, InstanceDescriptor, PowerPreference, RequestAdapterOptions, RequestAdapterStatus,
};
pub use enumerate::{enumerate, fill};
pub use feature::{FeatureName, TextureFormat};
pub use handle::{AdapterId, HandleAllocator, InstanceId, SurfaceId};
pub use info::{AdapterInfo, AdapterType, Implementation, Limits};
