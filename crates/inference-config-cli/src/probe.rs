//! Capability probe backed by a JSON fixture.
//!
//! The CLI has no native inference module to ask, so device lists come from
//! a file shaped like the native layer's answer:
//!
//! ```json
//! [
//!   { "deviceName": "CPU", "type": "cpu" },
//!   { "deviceName": "GPUOpenCL", "type": "gpu" },
//!   { "deviceName": "HTP0", "type": "npu" }
//! ]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use inference_config_core::config::ProbeConfig;
use inference_config_core::error::ProbeError;
use inference_config_core::probe::{
    CapabilityProbe, DeviceInfo, GpuSupport, GpuUnsupportedReason, ProbeResult,
};
use inference_config_core::stubs::StaticCapabilityProbe;

/// Reads the device list from disk on every call.
#[derive(Debug, Clone)]
pub struct FileCapabilityProbe {
    path: PathBuf,
    gpu_supported: Option<bool>,
}

impl FileCapabilityProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gpu_supported: None,
        }
    }

    #[must_use]
    pub fn with_gpu_supported(mut self, supported: Option<bool>) -> Self {
        self.gpu_supported = supported;
        self
    }
}

#[async_trait]
impl CapabilityProbe for FileCapabilityProbe {
    async fn available_devices(&self) -> ProbeResult<Vec<DeviceInfo>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let devices: Vec<DeviceInfo> = serde_json::from_str(&contents).map_err(|e| {
            ProbeError::InvalidResponse(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(
            "Read {} devices from {}",
            devices.len(),
            self.path.display()
        );
        Ok(devices)
    }

    async fn gpu_support(&self) -> ProbeResult<GpuSupport> {
        let supported = match self.gpu_supported {
            Some(forced) => forced,
            None => self.available_devices().await?.iter().any(DeviceInfo::is_gpu),
        };
        Ok(if supported {
            GpuSupport::supported()
        } else {
            GpuSupport::unsupported(GpuUnsupportedReason::Unknown)
        })
    }
}

/// Probe for the configured fixture, or a CPU-only stub without one.
pub fn build_probe(config: &ProbeConfig) -> Arc<dyn CapabilityProbe> {
    match &config.devices_file {
        Some(path) => Arc::new(
            FileCapabilityProbe::new(path).with_gpu_supported(config.gpu_supported),
        ),
        None => {
            debug!("No devices file configured, probing as CPU only");
            let probe = StaticCapabilityProbe::cpu_only();
            match config.gpu_supported {
                Some(true) => Arc::new(probe.with_gpu_support(GpuSupport::supported())),
                _ => Arc::new(probe),
            }
        }
    }
}
