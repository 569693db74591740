//! CLI exit code handling.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Warning (recoverable problem, or an unsafe combination was reported)
//! - 2: Blocking (the persisted parameters are corrupt or structurally invalid)

use thiserror::Error;

use inference_config_core::error::{ConfigError, EngineError, ParamsError};

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Success
    Success = 0,
    /// Recoverable error or unsafe verdict, does not block
    Warning = 1,
    /// Parameters cannot be used as stored
    Blocking = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&EngineError> for CliExitCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::Params(_) => CliExitCode::Blocking,
            EngineError::Config(_) | EngineError::Probe(_) => CliExitCode::Warning,
        }
    }
}

impl From<&CliError> for CliExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Engine(e) => CliExitCode::from(e),
            CliError::Json { .. } => CliExitCode::Blocking,
            CliError::Read { .. } | CliError::Write { .. } => CliExitCode::Warning,
        }
    }
}

/// Errors raised by the CLI around the core library.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to write '{path}': {message}")]
    Write { path: String, message: String },

    #[error("'{path}' is not valid JSON: {message}")]
    Json { path: String, message: String },
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Engine(err.into())
    }
}

impl From<ParamsError> for CliError {
    fn from(err: ParamsError) -> Self {
        CliError::Engine(err.into())
    }
}

/// Log `err` and turn it into the exit code for a command handler.
pub fn report(err: &CliError) -> i32 {
    tracing::error!("{}", err);
    eprintln!("error: {}", err);
    CliExitCode::from(err).into()
}
