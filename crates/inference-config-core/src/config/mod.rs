//! Engine configuration.
//!
//! `EngineConfig` tells the engine which platform it is configuring for and,
//! for hosts without a native probe (the CLI, tests), where to find a device
//! fixture.
//!
//! # TOML Structure
//!
//! ```toml
//! platform = "android"
//!
//! [probe]
//! devices_file = "./devices.json"
//! gpu_supported = false
//! ```
//!
//! # Environment Overrides
//!
//! | Variable | Config Path |
//! |----------|-------------|
//! | `INFERENCE_CONFIG_PLATFORM` | `platform` |
//! | `INFERENCE_CONFIG_DEVICES_FILE` | `probe.devices_file` |

pub mod constants;


use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Platform;

/// Environment variable overriding [`EngineConfig::platform`].
pub const ENV_PLATFORM: &str = "INFERENCE_CONFIG_PLATFORM";

/// Environment variable overriding [`ProbeConfig::devices_file`].
pub const ENV_DEVICES_FILE: &str = "INFERENCE_CONFIG_DEVICES_FILE";

fn default_platform() -> Platform {
    Platform::Android
}

/// Probe settings for hosts that read capabilities from a fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// JSON file holding the device list a native probe would report.
    #[serde(default)]
    pub devices_file: Option<String>,

    /// Forced answer for the GPU support check. `None` derives it from the
    /// device list.
    #[serde(default)]
    pub gpu_supported: Option<bool>,
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Platform the parameters are built for.
    /// Default: android
    #[serde(default = "default_platform")]
    pub platform: Platform,

    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            probe: ProbeConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - `ConfigError::Toml` if parsing fails
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are ignored with a warning; the file value stays.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var(ENV_PLATFORM) {
            match val.parse::<Platform>() {
                Ok(platform) => self.platform = platform,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_PLATFORM, e),
            }
        }
        if let Ok(val) = env::var(ENV_DEVICES_FILE) {
            self.probe.devices_file = Some(val);
        }
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `probe.devices_file` is set
    /// but empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(file) = &self.probe.devices_file {
            if file.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "probe.devices_file",
                    message: "must not be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }
}
