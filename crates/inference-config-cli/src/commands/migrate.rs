//! `migrate` command
//!
//! Upgrades a persisted parameter blob to the current schema and prints the
//! result (or writes it with `--output`).
//!
//! # Exit Codes
//! - 0: Migrated, or fell back to defaults for an unusable blob
//! - 1: File could not be read or written
//! - 2: Unusable blob with `--strict`

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info, warn};

use inference_config_core::migration::{needs_migration, try_migrate_context_init_params};

use super::{build_engine, read_json, GlobalOptions};
use crate::error::{report, CliError, CliExitCode};

/// Arguments for the `migrate` command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Persisted parameters (JSON), `-` for stdin
    pub file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail instead of falling back to defaults for an unusable blob
    #[arg(long)]
    pub strict: bool,

    /// Also reset cache types that are unsafe on the resolved backend
    #[arg(long)]
    pub finalize: bool,
}

/// Execute the migrate command
pub async fn migrate_command(args: MigrateArgs, global: &GlobalOptions) -> i32 {
    debug!("migrate_command: args={:?}", args);
    match run(&args, global).await {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => report(&e),
    }
}

async fn run(args: &MigrateArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let engine = build_engine(global)?;
    let blob = match read_json(&args.file) {
        Ok(blob) => Some(blob),
        Err(CliError::Json { path, message }) if !args.strict => {
            warn!("{} is not valid JSON, falling back to defaults: {}", path, message);
            None
        }
        Err(e) => return Err(e),
    };
    if blob.as_ref().is_some_and(|b| !needs_migration(b)) {
        info!("{} is already at the current version", args.file.display());
    }

    let params = match &blob {
        Some(blob) if args.strict => try_migrate_context_init_params(blob, engine.platform())?,
        blob => engine.load(blob.as_ref()),
    };
    let params = if args.finalize {
        engine.finalize(params).await
    } else {
        params
    };

    let out = params
        .to_value()
        .and_then(|v| serde_json::to_string_pretty(&v))
        .map_err(|e| CliError::Write {
            path: "<json>".to_string(),
            message: e.to_string(),
        })?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, out + "\n").map_err(|e| CliError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            info!("Wrote migrated parameters to {}", path.display());
        }
        None => println!("{}", out),
    }
    Ok(())
}
