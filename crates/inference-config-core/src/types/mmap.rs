//! Memory-mapping mode for model weights.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state `use_mmap` setting.
///
/// `smart` lets the engine decide per model (mmap unless the file is
/// expected to be repacked for the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseMmap {
    True,
    False,
    Smart,
}

impl UseMmap {
    pub fn as_str(self) -> &'static str {
        match self {
            UseMmap::True => "true",
            UseMmap::False => "false",
            UseMmap::Smart => "smart",
        }
    }
}

impl From<bool> for UseMmap {
    fn from(value: bool) -> Self {
        if value {
            UseMmap::True
        } else {
            UseMmap::False
        }
    }
}

impl fmt::Display for UseMmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `use_mmap` as older releases stored it: a plain boolean, or already the
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyUseMmap {
    Flag(bool),
    Mode(UseMmap),
}

impl From<LegacyUseMmap> for UseMmap {
    fn from(value: LegacyUseMmap) -> Self {
        match value {
            LegacyUseMmap::Flag(flag) => UseMmap::from(flag),
            LegacyUseMmap::Mode(mode) => mode,
        }
    }
}
