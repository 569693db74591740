//! Selectable device options.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FlashAttnType, Platform};

/// Identifier of a device option shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceOptionId {
    /// Engine picks devices itself. iOS only.
    Auto,
    Gpu,
    Hexagon,
    Cpu,
}

impl DeviceOptionId {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceOptionId::Auto => "auto",
            DeviceOptionId::Gpu => "gpu",
            DeviceOptionId::Hexagon => "hexagon",
            DeviceOptionId::Cpu => "cpu",
        }
    }
}

impl fmt::Display for DeviceOptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend selection bundled with the settings known to be safe for it.
///
/// Constructed only through [`DeviceOption::new`], which rejects an empty
/// flash-attention range or a default outside that range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceOption {
    pub id: DeviceOptionId,
    pub label: String,
    pub description: String,

    /// Device identifiers to pass to the engine. `None` means auto-select.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,

    /// Recommended `n_gpu_layers` when this option is selected.
    pub n_gpu_layers: u32,

    default_flash_attn_type: FlashAttnType,
    valid_flash_attn_types: Vec<FlashAttnType>,

    pub platform: Platform,

    /// Suggested first choice on this platform.
    pub recommended: bool,
}

impl DeviceOption {
    /// Build an option, returning `None` if `valid` is empty or does not
    /// contain `default`.
    pub fn new(
        id: DeviceOptionId,
        platform: Platform,
        devices: Option<Vec<String>>,
        n_gpu_layers: u32,
        default: FlashAttnType,
        valid: Vec<FlashAttnType>,
    ) -> Option<Self> {
        if valid.is_empty() || !valid.contains(&default) {
            return None;
        }
        Some(Self {
            id,
            label: String::new(),
            description: String::new(),
            devices,
            n_gpu_layers,
            default_flash_attn_type: default,
            valid_flash_attn_types: valid,
            platform,
            recommended: false,
        })
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.label = label.into();
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    /// Mode applied when the current one is outside the valid range.
    pub fn default_flash_attn_type(&self) -> FlashAttnType {
        self.default_flash_attn_type
    }

    /// Flash-attention modes this option can run safely. Never empty.
    pub fn valid_flash_attn_types(&self) -> &[FlashAttnType] {
        &self.valid_flash_attn_types
    }

    pub fn supports_flash_attn(&self, mode: FlashAttnType) -> bool {
        self.valid_flash_attn_types.contains(&mode)
    }
}
