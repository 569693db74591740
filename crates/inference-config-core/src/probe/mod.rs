//! Capability probe interface.
//!
//! The host supplies an implementation that asks the native inference
//! wrapper which compute devices exist. This crate only consumes it.
//!
//! # Failure contract
//!
//! Implementations report failures as [`ProbeError`]. Consumers never see
//! them: [`devices_or_empty`] and [`gpu_support_or_unsupported`] log the
//! error and return the conservative answer (no devices, no GPU), which the
//! resolver and catalog turn into the CPU backend.


use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::constants::devices;
use crate::error::ProbeError;

/// Result alias for probe calls.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Kind of compute device reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cpu,
    Gpu,
    Npu,
}

/// One compute device as reported by the native layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// Whatever else the native layer reports (memory, vendor, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceInfo {
    pub fn new(device_name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            device_name: device_name.into(),
            kind,
            extra: Map::new(),
        }
    }

    pub fn is_gpu(&self) -> bool {
        self.kind == DeviceKind::Gpu
    }

    /// Qualcomm Hexagon NPUs are reported as `HTP0`, `HTP1`, ...
    pub fn is_hexagon(&self) -> bool {
        self.device_name.starts_with(devices::HEXAGON_PREFIX)
    }
}

/// Why GPU acceleration is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuUnsupportedReason {
    /// iOS too old for the Metal features the engine needs.
    IosVersion,
    /// Android device without an Adreno GPU.
    NoAdreno,
    MissingCpuFeatures,
    Unknown,
}

impl GpuUnsupportedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GpuUnsupportedReason::IosVersion => "ios_version",
            GpuUnsupportedReason::NoAdreno => "no_adreno",
            GpuUnsupportedReason::MissingCpuFeatures => "missing_cpu_features",
            GpuUnsupportedReason::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for GpuUnsupportedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer of the GPU support check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuSupport {
    pub is_supported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<GpuUnsupportedReason>,
}

impl GpuSupport {
    pub fn supported() -> Self {
        Self {
            is_supported: true,
            reason: None,
        }
    }

    pub fn unsupported(reason: GpuUnsupportedReason) -> Self {
        Self {
            is_supported: false,
            reason: Some(reason),
        }
    }
}

/// Hardware capability queries answered by the host.
///
/// Calls are single-shot: no retry and no timeout are applied by this
/// crate. Implementations should fail fast rather than block.
#[async_trait]
pub trait CapabilityProbe: Send + Sync {
    /// Compute devices the inference engine can use.
    async fn available_devices(&self) -> ProbeResult<Vec<DeviceInfo>>;

    /// Whether GPU acceleration works on this hardware.
    async fn gpu_support(&self) -> ProbeResult<GpuSupport>;
}

/// Device list, or empty if the probe failed.
pub async fn devices_or_empty(probe: &dyn CapabilityProbe) -> Vec<DeviceInfo> {
    match probe.available_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            warn!("Device enumeration failed, assuming no accelerators: {}", e);
            Vec::new()
        }
    }
}

/// GPU support, or `unsupported(Unknown)` if the probe failed.
pub async fn gpu_support_or_unsupported(probe: &dyn CapabilityProbe) -> GpuSupport {
    match probe.gpu_support().await {
        Ok(support) => support,
        Err(e) => {
            warn!("GPU support check failed, assuming unsupported: {}", e);
            GpuSupport::unsupported(GpuUnsupportedReason::Unknown)
        }
    }
}
