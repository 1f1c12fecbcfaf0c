//! Configuration read from the process environment.
//!
//! The variable names match the ones the `wgpu` ecosystem reads, so a single
//! `WGPU_BACKEND=vulkan` steers every layer.

use crate::{BackendType, InstanceDescriptor, PowerPreference, RequestAdapterOptions};
use std::env;

pub const BACKEND_VAR: &str = "WGPU_BACKEND";
pub const POWER_PREFERENCE_VAR: &str = "WGPU_POWER_PREF";
pub const FORCE_FALLBACK_ADAPTER_VAR: &str = "WGPU_FORCE_FALLBACK_ADAPTER";

/// Parses a comma separated backend list. Unknown names are skipped.
pub fn parse_backends(value: &str) -> Vec<BackendType> {
    let mut backends = Vec::new();

    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        match name.parse::<BackendType>() {
            Ok(backend) if !backends.contains(&backend) => backends.push(backend),
            Ok(_) => {}
            Err(err) => log::warn!("{}: {}", BACKEND_VAR, err),
        }
    }

    backends
}

pub fn parse_power_preference(value: &str) -> PowerPreference {
    match value.trim().to_lowercase().as_str() {
        "low" | "low-power" | "lowpower" => PowerPreference::LowPower,
        "high" | "high-performance" | "highperformance" => PowerPreference::HighPerformance,
        _ => PowerPreference::Undefined,
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl InstanceDescriptor {
    /// Builds a descriptor restricted to the backends named in `WGPU_BACKEND`.
    pub fn from_env() -> Self {
        let backends = env::var(BACKEND_VAR)
            .map(|value| parse_backends(&value))
            .unwrap_or_default();

        Self {
            label: None,
            backends,
        }
    }
}

impl RequestAdapterOptions {
    /// Builds options from `WGPU_POWER_PREF` and `WGPU_FORCE_FALLBACK_ADAPTER`.
    pub fn from_env() -> Self {
        let power_preference = env::var(POWER_PREFERENCE_VAR)
            .map(|value| parse_power_preference(&value))
            .unwrap_or_default();
        let force_fallback_adapter = env::var(FORCE_FALLBACK_ADAPTER_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Self {
            compatible_surface: None,
            power_preference,
            force_fallback_adapter,
        }
    }
}
