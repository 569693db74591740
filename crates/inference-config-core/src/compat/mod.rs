//! Compatibility rule engine for KV-cache types.
//!
//! Pure, synchronous functions over the (cache type, flash-attention mode,
//! backend) triple. The V-cache matrix lives in one match table in
//! [`rules`]; everything else derives from it.
//!
//! | cache_type_v | flash_attn | backend | verdict |
//! |---|---|---|---|
//! | f16 / f32 | any | any | safe |
//! | quantized | off | any | unsafe |
//! | quantized | on | opencl, hexagon | unsafe |
//! | quantized | on | metal, cpu, blas | safe |
//! | quantized | auto | opencl, hexagon | unsafe |
//! | quantized | auto | metal, cpu, blas | safe |

mod options;
mod rules;

#[cfg(test)]
mod tests;

pub use options::{get_allowed_cache_type_k_options, get_allowed_cache_type_v_options, CacheTypeOption};
pub use rules::{is_cache_type_k_safe, is_cache_type_v_safe, CompatibilityVerdict};

use tracing::warn;

use crate::types::{BackendType, CacheType, ContextInitParams};

/// Return `params` with an unsafe V cache reset to `f16`.
///
/// Run before handing parameters to the inference engine so a setting that
/// became unsafe (backend or flash-attention mode changed underneath it) is
/// never applied. Safe values are returned unchanged.
pub fn enforce_cache_compatibility(
    params: ContextInitParams,
    backend: BackendType,
) -> ContextInitParams {
    let verdict = is_cache_type_v_safe(params.cache_type_v, params.flash_attn_type, backend);
    if verdict.safe {
        return params;
    }
    warn!(
        "Resetting V cache {} to f16 for flash_attn={} on {}: {}",
        params.cache_type_v,
        params.flash_attn_type,
        backend,
        verdict.reason.as_deref().unwrap_or("unsafe combination")
    );
    let k = params.cache_type_k;
    params.with_cache_types(k, CacheType::F16)
}
