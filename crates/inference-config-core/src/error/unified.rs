//! Top-level error type for inference-config-core.

use thiserror::Error;

use super::sub_errors::{ConfigError, ParamsError, ProbeError};

/// Top-level error type for inference-config-core.
///
/// All sub-errors convert into this type via `From`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parameters error: {0}")]
    Params(#[from] ParamsError),
}

impl EngineError {
    /// Whether the caller can keep going with a fallback value.
    ///
    /// Probe and parameter failures have documented fallbacks (CPU backend,
    /// default parameters). A broken engine configuration needs fixing.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::Probe(_) | EngineError::Params(_) => true,
            EngineError::Config(_) => false,
        }
    }
}

/// Result alias for [`EngineError`].
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Short alias, mirrors `EngineResult`.
pub type Result<T> = EngineResult<T>;
