//! Backend resolution.
//!
//! Maps a device selection to the backend that will actually run it. The
//! rule engine needs the backend, not the device names, to decide which
//! cache types are safe.


use tracing::debug;

use crate::config::constants::devices;
use crate::probe::{devices_or_empty, CapabilityProbe};
use crate::types::{BackendType, Platform};

/// Backend an explicit device identifier runs on.
///
/// Matching on the first entry only: the engine places the model on the
/// first listed device.
pub fn backend_for_device(device: &str, platform: Platform) -> BackendType {
    if device.eq_ignore_ascii_case(devices::METAL) {
        BackendType::Metal
    } else if device.eq_ignore_ascii_case(devices::CPU) {
        BackendType::Cpu
    } else if device.starts_with(devices::HEXAGON_PREFIX) {
        BackendType::Hexagon
    } else {
        match platform {
            Platform::Android => BackendType::OpenCl,
            // Unrecognized identifier elsewhere: assume nothing.
            Platform::Ios => BackendType::Cpu,
        }
    }
}

/// Resolve the backend for a device selection.
///
/// With explicit devices the answer is synchronous. With auto-select, iOS
/// always means Metal; Android asks the probe and picks OpenCL if any GPU
/// is reported. A failed probe counts as "no GPU".
pub async fn infer_backend_type(
    devices: Option<&[String]>,
    platform: Platform,
    probe: &dyn CapabilityProbe,
) -> BackendType {
    if let Some(first) = devices.and_then(|d| d.first()) {
        let backend = backend_for_device(first, platform);
        debug!("Device '{}' resolves to backend {}", first, backend);
        return backend;
    }

    match platform {
        Platform::Ios => BackendType::Metal,
        Platform::Android => {
            let has_gpu = devices_or_empty(probe).await.iter().any(|d| d.is_gpu());
            let backend = if has_gpu {
                BackendType::OpenCl
            } else {
                BackendType::Cpu
            };
            debug!("Auto device selection resolves to backend {}", backend);
            backend
        }
    }
}
