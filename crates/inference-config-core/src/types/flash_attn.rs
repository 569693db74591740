//! Flash-attention mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the inference engine should use flash attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashAttnType {
    /// Let the backend decide. Some backends silently turn it off.
    Auto,
    On,
    Off,
}

impl FlashAttnType {
    pub const ALL: [FlashAttnType; 3] = [FlashAttnType::Auto, FlashAttnType::On, FlashAttnType::Off];

    pub fn as_str(self) -> &'static str {
        match self {
            FlashAttnType::Auto => "auto",
            FlashAttnType::On => "on",
            FlashAttnType::Off => "off",
        }
    }
}

impl fmt::Display for FlashAttnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlashAttnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(FlashAttnType::Auto),
            "on" => Ok(FlashAttnType::On),
            "off" => Ok(FlashAttnType::Off),
            other => Err(format!("unknown flash attention mode '{}'", other)),
        }
    }
}
