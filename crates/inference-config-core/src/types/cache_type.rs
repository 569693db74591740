//! KV-cache storage formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage format of the K or V cache tensors.
///
/// Serialized with the engine's lowercase identifiers (`f16`, `q8_0`, ...).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheType {
    #[serde(rename = "f16")]
    F16,
    #[serde(rename = "f32")]
    F32,
    #[serde(rename = "q8_0")]
    Q8_0,
    #[serde(rename = "q5_1")]
    Q5_1,
    #[serde(rename = "q5_0")]
    Q5_0,
    #[serde(rename = "q4_1")]
    Q4_1,
    #[serde(rename = "q4_0")]
    Q4_0,
    #[serde(rename = "iq4_nl")]
    IQ4_NL,
}

impl CacheType {
    /// Every cache type, in the order option lists present them.
    pub const ALL: [CacheType; 8] = [
        CacheType::F16,
        CacheType::F32,
        CacheType::Q8_0,
        CacheType::Q5_1,
        CacheType::Q5_0,
        CacheType::Q4_1,
        CacheType::Q4_0,
        CacheType::IQ4_NL,
    ];

    /// True for every format narrower than 16-bit float.
    pub fn is_quantized(self) -> bool {
        !matches!(self, CacheType::F16 | CacheType::F32)
    }

    /// Engine identifier, e.g. `q8_0`.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheType::F16 => "f16",
            CacheType::F32 => "f32",
            CacheType::Q8_0 => "q8_0",
            CacheType::Q5_1 => "q5_1",
            CacheType::Q5_0 => "q5_0",
            CacheType::Q4_1 => "q4_1",
            CacheType::Q4_0 => "q4_0",
            CacheType::IQ4_NL => "iq4_nl",
        }
    }

    /// Display label, e.g. `Q8_0`.
    pub fn label(self) -> &'static str {
        match self {
            CacheType::F16 => "F16",
            CacheType::F32 => "F32",
            CacheType::Q8_0 => "Q8_0",
            CacheType::Q5_1 => "Q5_1",
            CacheType::Q5_0 => "Q5_0",
            CacheType::Q4_1 => "Q4_1",
            CacheType::Q4_0 => "Q4_0",
            CacheType::IQ4_NL => "IQ4_NL",
        }
    }

    /// Nominal storage width per cached value, including block scales.
    pub fn bits_per_value(self) -> f32 {
        match self {
            CacheType::F32 => 32.0,
            CacheType::F16 => 16.0,
            CacheType::Q8_0 => 8.5,
            CacheType::Q5_1 => 6.0,
            CacheType::Q5_0 => 5.5,
            CacheType::Q4_1 => 5.0,
            CacheType::Q4_0 | CacheType::IQ4_NL => 4.5,
        }
    }
}

impl Default for CacheType {
    fn default() -> Self {
        CacheType::F16
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CacheType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown cache type '{}'", s))
    }
}
