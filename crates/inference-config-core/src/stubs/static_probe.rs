//! Capability probe with a fixed answer.

use async_trait::async_trait;

use crate::error::ProbeError;
use crate::probe::{CapabilityProbe, DeviceInfo, DeviceKind, GpuSupport, GpuUnsupportedReason, ProbeResult};

/// Probe that reports a fixed device list, or always fails.
///
/// GPU support is derived from the list (any `gpu` device) unless set
/// explicitly.
///
/// # Example
///
/// ```
/// use inference_config_core::probe::{DeviceInfo, DeviceKind};
/// use inference_config_core::stubs::StaticCapabilityProbe;
///
/// let probe = StaticCapabilityProbe::new(vec![
///     DeviceInfo::new("CPU", DeviceKind::Cpu),
///     DeviceInfo::new("GPUOpenCL", DeviceKind::Gpu),
/// ]);
/// assert_eq!(probe.devices().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityProbe {
    devices: Vec<DeviceInfo>,
    gpu_support: Option<GpuSupport>,
    failure: Option<String>,
}

impl StaticCapabilityProbe {
    pub fn new(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices,
            gpu_support: None,
            failure: None,
        }
    }

    /// CPU only.
    pub fn cpu_only() -> Self {
        Self::new(vec![DeviceInfo::new("CPU", DeviceKind::Cpu)])
    }

    /// Every call fails with `ProbeError::Unavailable(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            devices: Vec::new(),
            gpu_support: None,
            failure: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_gpu_support(mut self, support: GpuSupport) -> Self {
        self.gpu_support = Some(support);
        self
    }

    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    fn check_failure(&self) -> ProbeResult<()> {
        match &self.failure {
            Some(message) => Err(ProbeError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CapabilityProbe for StaticCapabilityProbe {
    async fn available_devices(&self) -> ProbeResult<Vec<DeviceInfo>> {
        self.check_failure()?;
        Ok(self.devices.clone())
    }

    async fn gpu_support(&self) -> ProbeResult<GpuSupport> {
        self.check_failure()?;
        if let Some(support) = self.gpu_support {
            return Ok(support);
        }
        if self.devices.iter().any(DeviceInfo::is_gpu) {
            Ok(GpuSupport::supported())
        } else {
            Ok(GpuSupport::unsupported(GpuUnsupportedReason::Unknown))
        }
    }
}
