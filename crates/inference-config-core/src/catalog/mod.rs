//! Device catalog.
//!
//! Builds the platform-specific list of [`DeviceOption`]s the user picks
//! from, and applies a selection to a parameter set.
//!
//! | Platform | Options | Flash attention |
//! |----------|---------|-----------------|
//! | iOS | auto, gpu (Metal), cpu | every mode valid |
//! | Android | cpu, gpu (if an OpenCL GPU exists), hexagon (if an `HTP*` device exists) | cpu: every mode; gpu, hexagon: `off` only |

mod selection;

#[cfg(test)]
mod tests;

pub use selection::{apply_device_selection, reconcile_flash_attn};

use tracing::debug;

use crate::config::constants::{defaults, devices};
use crate::probe::{devices_or_empty, CapabilityProbe, DeviceInfo};
use crate::types::{DeviceOption, DeviceOptionId, FlashAttnType, Platform};

/// Selectable device options for `platform`.
///
/// iOS options are fixed. Android options depend on what the probe
/// reports; a failing probe leaves only the CPU option.
pub async fn get_device_options(
    platform: Platform,
    probe: &dyn CapabilityProbe,
) -> Vec<DeviceOption> {
    let options = match platform {
        Platform::Ios => ios_device_options(),
        Platform::Android => android_device_options(&devices_or_empty(probe).await),
    };
    debug!(
        "Device options for {}: {:?}",
        platform,
        options.iter().map(|o| o.id).collect::<Vec<_>>()
    );
    options
}

/// The recommended option, or the first one if none is marked.
pub fn recommended_device_option(options: &[DeviceOption]) -> Option<&DeviceOption> {
    options
        .iter()
        .find(|o| o.recommended)
        .or_else(|| options.first())
}

/// Options on iOS. Metal handles every flash-attention mode.
pub fn ios_device_options() -> Vec<DeviceOption> {
    let all_modes = FlashAttnType::ALL.to_vec();
    let platform = Platform::Ios;

    [
        DeviceOption::new(
            DeviceOptionId::Auto,
            platform,
            None,
            defaults::N_GPU_LAYERS_ALL,
            FlashAttnType::Auto,
            all_modes.clone(),
        )
        .map(|o| {
            o.with_label("Auto", "Let the engine pick the best device")
                .recommended()
        }),
        DeviceOption::new(
            DeviceOptionId::Gpu,
            platform,
            Some(vec![devices::METAL.to_string()]),
            defaults::N_GPU_LAYERS_ALL,
            FlashAttnType::Auto,
            all_modes.clone(),
        )
        .map(|o| o.with_label("GPU (Metal)", "Run every layer on the Apple GPU")),
        DeviceOption::new(
            DeviceOptionId::Cpu,
            platform,
            Some(vec![devices::CPU.to_string()]),
            defaults::N_GPU_LAYERS_NONE,
            FlashAttnType::Auto,
            all_modes,
        )
        .map(|o| o.with_label("CPU", "Run on the CPU only")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Options on Android given the probe's device list.
///
/// CPU is always offered and recommended. OpenCL and Hexagon are limited
/// to flash attention `off`: OpenCL cannot run it, and Hexagon support
/// differs between chips.
pub fn android_device_options(reported: &[DeviceInfo]) -> Vec<DeviceOption> {
    let platform = Platform::Android;
    let mut options = Vec::with_capacity(3);

    options.extend(
        DeviceOption::new(
            DeviceOptionId::Cpu,
            platform,
            Some(vec![devices::CPU.to_string()]),
            defaults::N_GPU_LAYERS_NONE,
            FlashAttnType::Off,
            FlashAttnType::ALL.to_vec(),
        )
        .map(|o| {
            o.with_label("CPU", "Works on every device; the most reliable choice")
                .recommended()
        }),
    );

    if let Some(gpu) = reported.iter().find(|d| d.is_gpu()) {
        options.extend(
            DeviceOption::new(
                DeviceOptionId::Gpu,
                platform,
                Some(vec![gpu.device_name.clone()]),
                defaults::N_GPU_LAYERS_ALL,
                FlashAttnType::Off,
                vec![FlashAttnType::Off],
            )
            .map(|o| {
                o.with_label(
                    "GPU (OpenCL)",
                    "Adreno GPU via OpenCL; flash attention is not available",
                )
            }),
        );
    }

    let hexagon: Vec<String> = reported
        .iter()
        .filter(|d| d.is_hexagon())
        .map(|d| d.device_name.clone())
        .collect();
    if !hexagon.is_empty() {
        options.extend(
            DeviceOption::new(
                DeviceOptionId::Hexagon,
                platform,
                Some(hexagon),
                defaults::N_GPU_LAYERS_ALL,
                FlashAttnType::Off,
                vec![FlashAttnType::Off],
            )
            .map(|o| {
                o.with_label(
                    "NPU (Hexagon)",
                    "Qualcomm Hexagon NPU; flash attention support varies by chip",
                )
            }),
        );
    }

    options
}
