use crate::{Backend, Error, Result};
use std::fmt;
use webgpu_boot_core::{
    enumerate, AdapterId, AdapterInfo, FeatureName, Limits, SurfaceId, TextureFormat,
};

/// Everything an adapter reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterReport {
    pub info: AdapterInfo,
    pub limits: Limits,
    pub features: Vec<FeatureName>,
}

impl fmt::Display for AdapterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adapter properties:")?;
        writeln!(f, " - vendorID: {:#x}", self.info.vendor_id)?;
        writeln!(f, " - deviceID: {:#x}", self.info.device_id)?;
        writeln!(f, " - name: {}", self.info.name)?;
        if !self.info.driver_description.is_empty() {
            writeln!(f, " - driverDescription: {}", self.info.driver_description)?;
        }
        writeln!(f, " - adapterType: {:?}", self.info.adapter_type)?;
        writeln!(f, " - backendType: {}", self.info.backend_type)?;

        writeln!(f, "Adapter limits:")?;
        write!(f, "{}", self.limits)?;

        writeln!(f, "Adapter features:")?;
        for feature in &self.features {
            writeln!(f, " - {}", feature)?;
        }

        Ok(())
    }
}

/// Lists the features of an adapter, in backend order.
pub fn adapter_features<B>(backend: &B, adapter: AdapterId) -> Vec<FeatureName>
where
    B: Backend + ?Sized,
{
    enumerate(|out| backend.adapter_enumerate_features(adapter, out))
}

/// Gathers properties, limits and features of an adapter.
///
/// # Errors
///
/// - [`Error::InvalidHandle`] if the adapter is unknown to the backend.
pub fn inspect_adapter<B>(backend: &B, adapter: AdapterId) -> Result<AdapterReport>
where
    B: Backend + ?Sized,
{
    let invalid = || Error::InvalidHandle(format!("{:?}", adapter));

    let info = backend.adapter_info(adapter).ok_or_else(invalid)?;
    let limits = backend.adapter_limits(adapter).ok_or_else(invalid)?;
    let features = adapter_features(backend, adapter);

    Ok(AdapterReport {
        info,
        limits,
        features,
    })
}

pub fn surface_formats<B>(backend: &B, surface: SurfaceId, adapter: AdapterId) -> Vec<TextureFormat>
where
    B: Backend + ?Sized,
{
    enumerate(|out| backend.surface_formats(surface, adapter, out))
}

/// The format the surface prefers when presented by `adapter`.
pub fn surface_preferred_format<B>(
    backend: &B,
    surface: SurfaceId,
    adapter: AdapterId,
) -> Option<TextureFormat>
where
    B: Backend + ?Sized,
{
    surface_formats(backend, surface, adapter).into_iter().next()
}
