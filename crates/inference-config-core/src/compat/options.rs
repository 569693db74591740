//! UI-ready cache-type option lists.

use serde::Serialize;

use super::rules::{is_cache_type_k_safe, is_cache_type_v_safe, CompatibilityVerdict};
use crate::types::{BackendType, CacheType, FlashAttnType};

/// One selectable cache type, possibly disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheTypeOption {
    pub value: CacheType,
    pub label: &'static str,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CacheTypeOption {
    fn from_verdict(value: CacheType, verdict: CompatibilityVerdict) -> Self {
        Self {
            value,
            label: value.label(),
            disabled: !verdict.safe,
            reason: if verdict.safe { None } else { verdict.reason },
        }
    }
}

/// One entry per cache type for the V cache. Unsafe types are disabled,
/// never removed.
pub fn get_allowed_cache_type_v_options(
    flash_attn: FlashAttnType,
    backend: BackendType,
) -> Vec<CacheTypeOption> {
    CacheType::ALL
        .into_iter()
        .map(|t| CacheTypeOption::from_verdict(t, is_cache_type_v_safe(t, flash_attn, backend)))
        .collect()
}

/// One entry per cache type for the K cache.
pub fn get_allowed_cache_type_k_options(
    flash_attn: FlashAttnType,
    backend: BackendType,
) -> Vec<CacheTypeOption> {
    CacheType::ALL
        .into_iter()
        .map(|t| CacheTypeOption::from_verdict(t, is_cache_type_k_safe(t, flash_attn, backend)))
        .collect()
}
