//! Error types for inference-config-core.
//!
//! - [`EngineError`]: top-level error for every fallible operation in the crate
//! - Sub-error types: [`ProbeError`], [`ConfigError`], [`ParamsError`]
//!
//! The public contract functions (migration, backend resolution, device
//! catalog) are total: they turn these errors into conservative fallbacks
//! and log them. The fallible building blocks underneath return
//! [`Result`] so callers that want the failure can still see it.
//!
//! # Examples
//!
//! ```rust
//! use inference_config_core::error::{EngineError, ProbeError};
//!
//! let err = EngineError::from(ProbeError::Unavailable("native module not linked".into()));
//! assert!(err.is_recoverable());
//! assert!(err.to_string().contains("native module not linked"));
//! ```

mod sub_errors;
mod unified;

#[cfg(test)]
mod tests;

pub use sub_errors::{ConfigError, ParamsError, ProbeError};
pub use unified::{EngineError, EngineResult, Result};
