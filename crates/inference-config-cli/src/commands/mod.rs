//! CLI command handlers
//!
//! # Modules
//!
//! - `migrate`: Upgrade a persisted parameter blob to the current schema
//! - `validate`: Structural and compatibility check of a persisted blob
//! - `devices`: List the selectable device options for a platform
//! - `check`: Verdict for one cache type / flash attention / backend triple
//! - `options`: Cache-type option lists as a settings screen shows them

pub mod check;
pub mod devices;
pub mod migrate;
pub mod options;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use inference_config_core::{ConfigEngine, EngineConfig, Platform};

use crate::error::CliError;
use crate::probe::build_probe;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output for programmatic parsing
    Json,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub platform: Option<Platform>,
    pub devices_file: Option<PathBuf>,
}

/// Resolve configuration: file, then environment, then command line.
pub fn load_config(global: &GlobalOptions) -> Result<EngineConfig, CliError> {
    let config = match &global.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mut config = config.with_env_overrides();

    if let Some(platform) = global.platform {
        config.platform = platform;
    }
    if let Some(path) = &global.devices_file {
        config.probe.devices_file = Some(path.display().to_string());
    }

    config.validate()?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Engine for the resolved configuration.
pub fn build_engine(global: &GlobalOptions) -> Result<ConfigEngine, CliError> {
    let config = load_config(global)?;
    let probe = build_probe(&config.probe);
    Ok(ConfigEngine::from_config(&config, probe)?)
}

/// Read a JSON document from `path`, or stdin when `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value, CliError> {
    let display = path.display().to_string();
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::Read {
                path: display.clone(),
                message: e.to_string(),
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::Read {
            path: display.clone(),
            message: e.to_string(),
        })?
    };

    serde_json::from_str(&contents).map_err(|e| CliError::Json {
        path: display,
        message: e.to_string(),
    })
}

/// Pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Write {
        path: "<stdout>".to_string(),
        message: e.to_string(),
    })?;
    println!("{}", out);
    Ok(())
}
