//! Tests for the compatibility rule engine.

use super::*;
use crate::params::create_default_context_init_params;
use crate::types::{FlashAttnType, Platform};

/// Reference verdicts, written out row by row.
fn expected_v_reason(cache: CacheType, fa: FlashAttnType, backend: BackendType) -> Option<&'static str> {
    if !cache.is_quantized() {
        return None;
    }
    match fa {
        FlashAttnType::Off => Some("quantized V cache requires flash attention"),
        FlashAttnType::On => match backend {
            BackendType::OpenCl => Some("OpenCL does not support flash attention"),
            BackendType::Hexagon => Some("Hexagon flash attention support varies by device"),
            _ => None,
        },
        FlashAttnType::Auto => match backend {
            BackendType::OpenCl => Some("OpenCL auto-disables flash attention"),
            BackendType::Hexagon => Some("Hexagon flash attention support varies by device"),
            _ => None,
        },
    }
}

#[test]
fn test_v_matrix_all_combinations() {
    let mut checked = 0;
    for cache in CacheType::ALL {
        for fa in FlashAttnType::ALL {
            for backend in BackendType::ALL {
                let verdict = is_cache_type_v_safe(cache, fa, backend);
                let expected = expected_v_reason(cache, fa, backend);
                assert_eq!(verdict.safe, expected.is_none(), "{cache}/{fa}/{backend}");
                assert_eq!(verdict.reason.as_deref(), expected, "{cache}/{fa}/{backend}");
                checked += 1;
            }
        }
    }
    assert_eq!(checked, 8 * 3 * 5);
}

#[test]
fn test_k_always_safe() {
    for cache in CacheType::ALL {
        for fa in FlashAttnType::ALL {
            for backend in BackendType::ALL {
                let verdict = is_cache_type_k_safe(cache, fa, backend);
                assert!(verdict.safe);
                assert!(verdict.reason.is_none());
            }
        }
    }
}

#[test]
fn test_v_matrix_spot_checks() {
    assert!(!is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::Off, BackendType::Metal).safe);
    assert!(is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::On, BackendType::Metal).safe);
    let verdict = is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::Auto, BackendType::OpenCl);
    assert!(!verdict.safe);
    assert!(verdict.reason.unwrap().contains("auto-disables"));
    assert!(is_cache_type_v_safe(CacheType::F32, FlashAttnType::Off, BackendType::Hexagon).safe);
}

#[test]
fn test_quantized_v_never_safe_without_flash_attention() {
    for cache in CacheType::ALL.into_iter().filter(|c| c.is_quantized()) {
        for backend in BackendType::ALL {
            assert!(!is_cache_type_v_safe(cache, FlashAttnType::Off, backend).safe);
        }
    }
}

#[test]
fn test_unsafe_verdicts_always_carry_reason() {
    for cache in CacheType::ALL {
        for fa in FlashAttnType::ALL {
            for backend in BackendType::ALL {
                let verdict = is_cache_type_v_safe(cache, fa, backend);
                if !verdict.safe {
                    assert!(verdict.reason.as_deref().is_some_and(|r| !r.is_empty()));
                }
            }
        }
    }
}

#[test]
fn test_v_options_keep_every_member() {
    let options = get_allowed_cache_type_v_options(FlashAttnType::Off, BackendType::OpenCl);
    assert_eq!(options.len(), CacheType::ALL.len());
    let values: Vec<_> = options.iter().map(|o| o.value).collect();
    assert_eq!(values, CacheType::ALL.to_vec());

    for option in &options {
        assert_eq!(option.disabled, option.value.is_quantized());
        assert_eq!(option.reason.is_some(), option.disabled);
    }
}

#[test]
fn test_v_options_all_enabled_on_metal_with_flash_attention() {
    let options = get_allowed_cache_type_v_options(FlashAttnType::On, BackendType::Metal);
    assert!(options.iter().all(|o| !o.disabled && o.reason.is_none()));
}

#[test]
fn test_k_options_all_enabled() {
    for backend in BackendType::ALL {
        let options = get_allowed_cache_type_k_options(FlashAttnType::Off, backend);
        assert_eq!(options.len(), 8);
        assert!(options.iter().all(|o| !o.disabled));
    }
}

#[test]
fn test_option_labels() {
    let options = get_allowed_cache_type_k_options(FlashAttnType::Auto, BackendType::Cpu);
    assert_eq!(options[0].label, "F16");
    assert_eq!(options[7].label, "IQ4_NL");
}

#[test]
fn test_enforce_resets_unsafe_v_cache() {
    let params = create_default_context_init_params(Platform::Android)
        .with_cache_types(CacheType::Q8_0, CacheType::Q8_0)
        .with_flash_attn_type(FlashAttnType::Auto);

    let enforced = enforce_cache_compatibility(params.clone(), BackendType::OpenCl);
    assert_eq!(enforced.cache_type_v, CacheType::F16);
    assert_eq!(enforced.cache_type_k, CacheType::Q8_0, "K cache untouched");

    let kept = enforce_cache_compatibility(params.clone(), BackendType::Cpu);
    assert_eq!(kept, params);
}
