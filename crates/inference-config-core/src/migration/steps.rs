//! One pure transformation per schema version boundary.
//!
//! Steps only touch the fields their boundary introduced and only fill
//! values that are absent, except for the documented conversions of
//! deprecated fields and the one-time context-size bump.

use super::legacy::{LegacyContextInitParams, ParamsV1};
use crate::config::constants::defaults;
use crate::types::{FlashAttnType, LegacyUseMmap, PartialContextInitParams, Platform, UseMmap};

/// 0.0 → 1.0.
///
/// - `n_context` becomes `n_ctx` unless `n_ctx` is already set
/// - `use_mlock` defaults to `false`
/// - `use_mmap` defaults per platform; a boolean becomes its string form
/// - `no_gpu_devices` defaults to `false`
pub fn upgrade_v0_to_v1(legacy: LegacyContextInitParams, platform: Platform) -> ParamsV1 {
    let LegacyContextInitParams {
        version: _,
        n_context,
        fields: mut rest,
    } = legacy;

    if rest.n_ctx.is_none() {
        rest.n_ctx = n_context;
    }

    let use_mlock = rest.use_mlock.take().unwrap_or(defaults::USE_MLOCK);
    let use_mmap = rest
        .use_mmap
        .take()
        .map(UseMmap::from)
        .unwrap_or_else(|| platform.default_use_mmap());
    let no_gpu_devices = rest.no_gpu_devices.take().unwrap_or(false);

    ParamsV1 {
        use_mlock,
        use_mmap,
        no_gpu_devices,
        rest,
    }
}

/// 1.0 → 2.0.
///
/// - `no_gpu_devices: true` pins everything to the CPU (`n_gpu_layers = 0`);
///   `false` switches to auto-selected devices and offloads all layers unless
///   the user had picked a non-zero layer count. `devices` is cleared either
///   way. The deprecated flag itself is kept.
/// - a boolean `flash_attn` becomes `flash_attn_type` unless one is already
///   set; with neither, the platform default applies. The deprecated flag
///   itself is kept.
/// - `kv_unified` and `n_parallel` default to `true` and `1`
/// - `n_ctx` at the old 1024 default is bumped to 2048
pub fn upgrade_v1_to_v2(v1: ParamsV1, platform: Platform) -> PartialContextInitParams {
    let ParamsV1 {
        use_mlock,
        use_mmap,
        no_gpu_devices,
        rest: mut params,
    } = v1;

    params.use_mlock = Some(use_mlock);
    params.use_mmap = Some(LegacyUseMmap::Mode(use_mmap));
    params.no_gpu_devices = Some(no_gpu_devices);

    params.devices = None;
    if no_gpu_devices {
        params.n_gpu_layers = Some(defaults::N_GPU_LAYERS_NONE);
    } else if matches!(params.n_gpu_layers, None | Some(0)) {
        params.n_gpu_layers = Some(defaults::N_GPU_LAYERS_ALL);
    }

    if params.flash_attn_type.is_none() {
        params.flash_attn_type = Some(match params.flash_attn {
            Some(true) => platform.flash_attn_enabled_equivalent(),
            Some(false) => FlashAttnType::Off,
            None => platform.default_flash_attn_type(),
        });
    }

    params.kv_unified.get_or_insert(defaults::KV_UNIFIED);
    params.n_parallel.get_or_insert(defaults::N_PARALLEL);

    if params.n_ctx == Some(defaults::LEGACY_N_CTX) {
        params.n_ctx = Some(defaults::N_CTX);
    }

    params
}
