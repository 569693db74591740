//! `validate` command
//!
//! Checks a persisted blob against the current schema, then checks that
//! its V cache type is safe on the backend its devices resolve to.
//!
//! # Exit Codes
//! - 0: Valid and safe
//! - 1: Valid, but the V cache would be reset before use
//! - 2: Structurally invalid (missing fields, wrong types, not an object)

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::debug;

use inference_config_core::compat::is_cache_type_v_safe;
use inference_config_core::error::ParamsError;
use inference_config_core::migration::needs_migration;
use inference_config_core::params::check_context_init_params;
use inference_config_core::{BackendType, ContextInitParams};

use super::{build_engine, print_json, read_json, GlobalOptions, OutputFormat};
use crate::error::{report, CliError, CliExitCode};

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Persisted parameters (JSON), `-` for stdin
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Response structure for JSON output
#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
    needs_migration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend: Option<BackendType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_warning: Option<String>,
}

/// Execute the validate command
pub async fn validate_command(args: ValidateArgs, global: &GlobalOptions) -> i32 {
    debug!("validate_command: args={:?}", args);
    match run(&args, global).await {
        Ok(code) => code.into(),
        Err(e) => report(&e),
    }
}

async fn run(args: &ValidateArgs, global: &GlobalOptions) -> Result<CliExitCode, CliError> {
    let engine = build_engine(global)?;
    let blob = read_json(&args.file)?;
    let mut response = ValidateResponse {
        valid: true,
        needs_migration: needs_migration(&blob),
        error: None,
        backend: None,
        cache_warning: None,
    };

    let code = match check_context_init_params(&blob) {
        Err(e) => {
            response.valid = false;
            response.error = Some(e.to_string());
            CliExitCode::Blocking
        }
        Ok(()) => {
            let params: ContextInitParams =
                serde_json::from_value(blob).map_err(ParamsError::from)?;
            let backend = engine.active_backend(&params).await;
            let verdict =
                is_cache_type_v_safe(params.cache_type_v, params.flash_attn_type, backend);
            response.backend = Some(backend);
            if verdict.safe {
                CliExitCode::Success
            } else {
                response.cache_warning = verdict.reason;
                CliExitCode::Warning
            }
        }
    };

    match args.format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Text => print_text(&args.file, &response),
    }
    Ok(code)
}

fn print_text(file: &Path, response: &ValidateResponse) {
    if let Some(error) = &response.error {
        println!("{}: invalid ({})", file.display(), error);
        return;
    }
    println!("{}: valid", file.display());
    if response.needs_migration {
        println!("  version is not current; run `migrate` to upgrade");
    }
    if let Some(backend) = response.backend {
        println!("  backend: {}", backend);
    }
    if let Some(warning) = &response.cache_warning {
        println!("  warning: V cache will be reset to f16: {}", warning);
    }
}
