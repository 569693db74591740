//! Sub-error types for inference-config-core.
//!
//! Each error type covers a specific domain of failures.

use thiserror::Error;

// ============================================================================
// PROBE ERROR
// ============================================================================

/// Capability probe failures.
///
/// Never surfaced past the resolver or catalog: both degrade to the CPU
/// fallback and log the error.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The native probe is not available on this host.
    #[error("Capability probe unavailable: {0}")]
    Unavailable(String),

    /// The probe ran but its answer could not be understood.
    #[error("Capability probe returned an invalid response: {0}")]
    InvalidResponse(String),

    /// Reading a probe fixture failed.
    #[error("Capability probe IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Engine configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    /// TOML could not be parsed or serialized.
    #[error("Invalid TOML: {0}")]
    Toml(String),

    /// A value is out of range or inconsistent.
    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

// ============================================================================
// PARAMS ERROR
// ============================================================================

/// Failures decoding a persisted parameter blob.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The blob is not a JSON object.
    #[error("Persisted parameters must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A known field has the wrong type or an out-of-range value.
    #[error("Malformed persisted parameters: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A field required by the current schema is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
