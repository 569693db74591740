//! Compute backends the inference engine can run on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical backend a device selection resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Apple GPU.
    Metal,
    /// Android GPU (Adreno).
    OpenCl,
    /// Qualcomm Hexagon NPU.
    Hexagon,
    Cpu,
    /// BLAS-accelerated CPU path.
    Blas,
}

impl BackendType {
    pub const ALL: [BackendType; 5] = [
        BackendType::Metal,
        BackendType::OpenCl,
        BackendType::Hexagon,
        BackendType::Cpu,
        BackendType::Blas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendType::Metal => "metal",
            BackendType::OpenCl => "opencl",
            BackendType::Hexagon => "hexagon",
            BackendType::Cpu => "cpu",
            BackendType::Blas => "blas",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        BackendType::ALL
            .into_iter()
            .find(|b| b.as_str() == needle)
            .ok_or_else(|| format!("unknown backend '{}'", s))
    }
}
