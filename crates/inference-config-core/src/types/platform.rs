//! Host platform capability value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{FlashAttnType, UseMmap};
use crate::config::constants::defaults;

/// The platform class the configuration is built for.
///
/// Passed explicitly to every function whose behavior differs by platform,
/// so both platforms can be exercised side by side in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple devices: Metal GPU, reliable flash attention.
    Ios,
    /// Android devices: OpenCL GPU (Adreno), optional Hexagon NPU.
    Android,
}

impl Platform {
    /// Both platforms, in a stable order.
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    /// Flash-attention mode used when nothing else is known.
    ///
    /// Android GPUs auto-disable or lack flash attention, so `off` is the
    /// only mode that behaves identically on every backend there.
    pub fn default_flash_attn_type(self) -> FlashAttnType {
        match self {
            Platform::Ios => FlashAttnType::Auto,
            Platform::Android => FlashAttnType::Off,
        }
    }

    /// Flash-attention mode a legacy `flash_attn: true` maps to.
    pub fn flash_attn_enabled_equivalent(self) -> FlashAttnType {
        match self {
            Platform::Ios => FlashAttnType::Auto,
            Platform::Android => FlashAttnType::Off,
        }
    }

    pub fn default_use_mmap(self) -> UseMmap {
        match self {
            Platform::Ios => UseMmap::True,
            Platform::Android => UseMmap::Smart,
        }
    }

    pub fn default_n_gpu_layers(self) -> u32 {
        match self {
            Platform::Ios => defaults::N_GPU_LAYERS_ALL,
            Platform::Android => defaults::N_GPU_LAYERS_NONE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform '{}', expected ios or android", other)),
        }
    }
}
