//! Factory and structural validator for [`ContextInitParams`].
//!
//! The factory is total: any combination of overrides produces a complete,
//! current-version value. The validator only answers "does this persisted
//! blob have every field the current schema needs, with the right type";
//! cross-field compatibility belongs to [`crate::compat`].


use serde_json::Value;

use crate::config::constants::{defaults, schema};
use crate::error::ParamsError;
use crate::types::{
    CacheType, ContextInitParams, Platform, PartialContextInitParams, UseMmap,
};

/// Fields every current-schema blob must carry. `devices` is optional.
pub const REQUIRED_FIELDS: [&str; 13] = [
    "version",
    "n_ctx",
    "n_batch",
    "n_ubatch",
    "n_threads",
    "cache_type_k",
    "cache_type_v",
    "n_gpu_layers",
    "use_mlock",
    "use_mmap",
    "flash_attn_type",
    "kv_unified",
    "n_parallel",
];

/// Build a current-version value from defaults plus caller overrides.
///
/// A boolean `use_mmap` is converted to its string form. A missing
/// `flash_attn_type` is derived from the platform. Zero values for the
/// positive-integer fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use inference_config_core::params::create_context_init_params;
/// use inference_config_core::types::{FlashAttnType, PartialContextInitParams, Platform};
///
/// let params = create_context_init_params(
///     PartialContextInitParams { n_ctx: Some(4096), ..Default::default() },
///     Platform::Ios,
/// );
/// assert_eq!(params.n_ctx, 4096);
/// assert_eq!(params.flash_attn_type, FlashAttnType::Auto);
/// ```
pub fn create_context_init_params(
    partial: PartialContextInitParams,
    platform: Platform,
) -> ContextInitParams {
    ContextInitParams {
        version: schema::CURRENT.to_string(),
        n_ctx: positive_or(partial.n_ctx, defaults::N_CTX),
        n_batch: positive_or(partial.n_batch, defaults::N_BATCH),
        n_ubatch: positive_or(partial.n_ubatch, defaults::N_UBATCH),
        n_threads: positive_or(partial.n_threads, defaults::N_THREADS),
        cache_type_k: partial.cache_type_k.unwrap_or(CacheType::F16),
        cache_type_v: partial.cache_type_v.unwrap_or(CacheType::F16),
        n_gpu_layers: partial
            .n_gpu_layers
            .unwrap_or_else(|| platform.default_n_gpu_layers()),
        use_mlock: partial.use_mlock.unwrap_or(defaults::USE_MLOCK),
        use_mmap: partial
            .use_mmap
            .map(UseMmap::from)
            .unwrap_or_else(|| platform.default_use_mmap()),
        devices: partial.devices,
        flash_attn_type: partial
            .flash_attn_type
            .unwrap_or_else(|| platform.default_flash_attn_type()),
        kv_unified: partial.kv_unified.unwrap_or(defaults::KV_UNIFIED),
        n_parallel: positive_or(partial.n_parallel, defaults::N_PARALLEL),
        no_gpu_devices: partial.no_gpu_devices,
        flash_attn: partial.flash_attn,
        extra: partial.extra,
    }
}

/// Defaults only. Also the fallback for unusable persisted blobs.
pub fn create_default_context_init_params(platform: Platform) -> ContextInitParams {
    create_context_init_params(PartialContextInitParams::default(), platform)
}

/// Structural check of a persisted blob against the current schema.
///
/// Returns `false` for a truncated or corrupted blob. Does not check
/// whether the cache types are safe for the configured backend.
pub fn validate_context_init_params(value: &Value) -> bool {
    match check_context_init_params(value) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Persisted context params failed validation: {}", e);
            false
        }
    }
}

/// Like [`validate_context_init_params`] but reports the first problem.
pub fn check_context_init_params(value: &Value) -> Result<(), ParamsError> {
    let object = value
        .as_object()
        .ok_or_else(|| ParamsError::NotAnObject(json_kind(value)))?;

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|f| !object.contains_key(*f))
    {
        return Err(ParamsError::MissingField(missing));
    }

    serde_json::from_value::<ContextInitParams>(value.clone())?;
    Ok(())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn positive_or(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}
