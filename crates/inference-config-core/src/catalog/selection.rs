//! Applying a device selection to a parameter set.

use tracing::info;

use crate::types::{ContextInitParams, DeviceOption, FlashAttnType};

/// Flash-attention mode to use after selecting `option`.
///
/// Keeps `current` when the option supports it, otherwise falls back to the
/// option's default.
pub fn reconcile_flash_attn(current: FlashAttnType, option: &DeviceOption) -> FlashAttnType {
    if option.supports_flash_attn(current) {
        current
    } else {
        option.default_flash_attn_type()
    }
}

/// New parameters with `option` selected.
///
/// Takes the option's devices and layer count, and resets flash attention
/// to the option's default if the current mode is outside its valid range.
pub fn apply_device_selection(params: &ContextInitParams, option: &DeviceOption) -> ContextInitParams {
    let flash_attn_type = reconcile_flash_attn(params.flash_attn_type, option);
    if flash_attn_type != params.flash_attn_type {
        info!(
            "Flash attention {} not valid for device option '{}', using {}",
            params.flash_attn_type, option.id, flash_attn_type
        );
    }
    params
        .clone()
        .with_devices(option.devices.clone(), option.n_gpu_layers)
        .with_flash_attn_type(flash_attn_type)
}
