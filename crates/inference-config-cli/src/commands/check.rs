//! `check` command
//!
//! Looks up one (cache type, flash attention, backend) combination in the
//! compatibility rules.
//!
//! # Exit Codes
//! - 0: Safe
//! - 1: Unsafe (the reason is printed)

use clap::Args;
use serde::Serialize;
use tracing::debug;

use inference_config_core::compat::{is_cache_type_k_safe, is_cache_type_v_safe, CompatibilityVerdict};
use inference_config_core::{BackendType, CacheType, FlashAttnType};

use super::{print_json, OutputFormat};
use crate::error::{report, CliExitCode};

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// V cache type (f16, f32, q8_0, q5_1, q5_0, q4_1, q4_0, iq4_nl)
    #[arg(long)]
    pub cache_type_v: CacheType,

    /// K cache type to check as well
    #[arg(long)]
    pub cache_type_k: Option<CacheType>,

    /// Flash attention mode (auto, on, off)
    #[arg(long)]
    pub flash_attn: FlashAttnType,

    /// Backend (metal, opencl, hexagon, cpu, blas)
    #[arg(long)]
    pub backend: BackendType,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    cache_type_v: CacheType,
    flash_attn: FlashAttnType,
    backend: BackendType,
    v: CompatibilityVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    k: Option<CompatibilityVerdict>,
}

/// Execute the check command
pub async fn check_command(args: CheckArgs) -> i32 {
    debug!("check_command: args={:?}", args);

    let response = CheckResponse {
        cache_type_v: args.cache_type_v,
        flash_attn: args.flash_attn,
        backend: args.backend,
        v: is_cache_type_v_safe(args.cache_type_v, args.flash_attn, args.backend),
        k: args
            .cache_type_k
            .map(|k| is_cache_type_k_safe(k, args.flash_attn, args.backend)),
    };

    match args.format {
        OutputFormat::Json => {
            if let Err(e) = print_json(&response) {
                return report(&e);
            }
        }
        OutputFormat::Text => {
            print_verdict("V", args.cache_type_v, &response.v);
            if let (Some(k), Some(verdict)) = (args.cache_type_k, &response.k) {
                print_verdict("K", k, verdict);
            }
        }
    }

    let all_safe = response.v.safe && response.k.as_ref().map_or(true, |k| k.safe);
    if all_safe {
        CliExitCode::Success.into()
    } else {
        CliExitCode::Warning.into()
    }
}

fn print_verdict(cache: &str, cache_type: CacheType, verdict: &CompatibilityVerdict) {
    match &verdict.reason {
        None => println!("{} cache {}: safe", cache, cache_type),
        Some(reason) => println!("{} cache {}: unsafe: {}", cache, cache_type, reason),
    }
}
