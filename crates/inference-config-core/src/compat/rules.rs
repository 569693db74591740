//! The KV-cache compatibility matrix.

use serde::{Deserialize, Serialize};

use crate::config::constants::reasons;
use crate::types::{BackendType, CacheType, FlashAttnType};

/// Outcome of a compatibility check.
///
/// `reason` is always present when `safe` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompatibilityVerdict {
    pub fn safe() -> Self {
        Self {
            safe: true,
            reason: None,
        }
    }

    pub fn unsafe_because(reason: impl Into<String>) -> Self {
        Self {
            safe: false,
            reason: Some(reason.into()),
        }
    }
}

/// Why a quantized V cache cannot run with this mode on this backend.
///
/// `None` means the combination is safe. Non-quantized caches never reach
/// this table.
fn quantized_v_cache_conflict(
    flash_attn: FlashAttnType,
    backend: BackendType,
) -> Option<&'static str> {
    use BackendType::{Blas, Cpu, Hexagon, Metal, OpenCl};
    use FlashAttnType::{Auto, Off, On};

    match (flash_attn, backend) {
        (Off, _) => Some(reasons::V_CACHE_REQUIRES_FLASH_ATTN),
        (On, OpenCl) => Some(reasons::OPENCL_NO_FLASH_ATTN),
        (On, Hexagon) => Some(reasons::HEXAGON_FLASH_ATTN_VARIES),
        (On, Metal | Cpu | Blas) => None,
        (Auto, OpenCl) => Some(reasons::OPENCL_AUTO_DISABLES_FLASH_ATTN),
        (Auto, Hexagon) => Some(reasons::HEXAGON_FLASH_ATTN_VARIES),
        (Auto, Metal | Cpu | Blas) => None,
    }
}

/// Whether `cache_type` can back the V cache.
///
/// A quantized V cache is only read correctly through the flash-attention
/// kernels, so it needs flash attention to be both requested and actually
/// honored by the backend.
///
/// # Example
///
/// ```
/// use inference_config_core::compat::is_cache_type_v_safe;
/// use inference_config_core::types::{BackendType, CacheType, FlashAttnType};
///
/// assert!(is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::On, BackendType::Metal).safe);
/// let verdict = is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::Auto, BackendType::OpenCl);
/// assert!(!verdict.safe);
/// assert!(verdict.reason.unwrap().contains("auto-disables"));
/// ```
pub fn is_cache_type_v_safe(
    cache_type: CacheType,
    flash_attn: FlashAttnType,
    backend: BackendType,
) -> CompatibilityVerdict {
    if !cache_type.is_quantized() {
        return CompatibilityVerdict::safe();
    }
    match quantized_v_cache_conflict(flash_attn, backend) {
        Some(reason) => CompatibilityVerdict::unsafe_because(reason),
        None => CompatibilityVerdict::safe(),
    }
}

/// Whether `cache_type` can back the K cache. Always safe.
///
/// Block alignment of quantized K caches depends on the model's head size,
/// which is not known when settings are edited.
pub fn is_cache_type_k_safe(
    _cache_type: CacheType,
    _flash_attn: FlashAttnType,
    _backend: BackendType,
) -> CompatibilityVerdict {
    CompatibilityVerdict::safe()
}
