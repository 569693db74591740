//! `options` command
//!
//! Prints the K and V cache-type lists a settings screen shows for a flash
//! attention mode and backend. Unsafe entries are listed as disabled.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use inference_config_core::compat::{
    get_allowed_cache_type_k_options, get_allowed_cache_type_v_options, CacheTypeOption,
};
use inference_config_core::{BackendType, FlashAttnType};

use super::{print_json, OutputFormat};
use crate::error::{report, CliExitCode};

/// Arguments for the `options` command
#[derive(Args, Debug)]
pub struct OptionsArgs {
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
struct OptionsResponse {
    k: Vec<CacheTypeOption>,
    v: Vec<CacheTypeOption>,
}

/// Execute the options command
pub async fn options_command(args: OptionsArgs) -> i32 {
    debug!("options_command: args={:?}", args);

    let response = OptionsResponse {
        k: get_allowed_cache_type_k_options(args.flash_attn, args.backend),
        v: get_allowed_cache_type_v_options(args.flash_attn, args.backend),
    };

    match args.format {
        OutputFormat::Json => {
            if let Err(e) = print_json(&response) {
                return report(&e);
            }
        }
        OutputFormat::Text => {
            println!(
                "Cache types for flash_attn={} on {}:",
                args.flash_attn, args.backend
            );
            print_list("K", &response.k);
            print_list("V", &response.v);
        }
    }
    CliExitCode::Success.into()
}

fn print_list(cache: &str, options: &[CacheTypeOption]) {
    println!("  {} cache:", cache);
    for option in options {
        match (&option.reason, option.disabled) {
            (Some(reason), true) => println!("    [ ] {:<22} {}", option.label, reason),
            _ => println!("    [x] {}", option.label),
        }
    }
}
