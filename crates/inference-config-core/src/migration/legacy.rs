//! Historical shapes of persisted context parameters.
//!
//! Each known schema version has its own Rust type. A blob is parsed once
//! into [`LegacyContextInitParams`] (the superset of every field any release
//! ever wrote, plus an unknown-fields bag) and then classified into a
//! [`VersionedParams`] by its version tag. Migration steps consume one
//! variant and produce the next.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::steps;
use super::version::SchemaVersion;
use crate::types::{PartialContextInitParams, Platform, UseMmap};

/// Superset of every field any release persisted.
///
/// Nothing is required. Field types are still checked: a string where a
/// number belongs makes the whole blob malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyContextInitParams {
    /// Raw tag. Kept as a JSON value since old builds wrote strings and
    /// some hand-edited blobs carry numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    /// Pre-1.0 name of `n_ctx`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_context: Option<u32>,

    #[serde(flatten)]
    pub fields: PartialContextInitParams,
}

/// 1.0 shape: `n_ctx` renamed, mmap/mlock/no-gpu flags always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsV1 {
    pub use_mlock: bool,
    pub use_mmap: UseMmap,
    pub no_gpu_devices: bool,
    /// Remaining fields, `use_mlock`/`use_mmap`/`no_gpu_devices` cleared.
    pub rest: PartialContextInitParams,
}

/// A persisted blob tagged with the schema version it follows.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedParams {
    V0(LegacyContextInitParams),
    V1(ParamsV1),
    /// Current shape, possibly incomplete. Finalized by the factory.
    V2(PartialContextInitParams),
}

impl VersionedParams {
    pub fn version(&self) -> SchemaVersion {
        match self {
            VersionedParams::V0(_) => SchemaVersion::V0_0,
            VersionedParams::V1(_) => SchemaVersion::V1_0,
            VersionedParams::V2(_) => SchemaVersion::V2_0,
        }
    }

    /// Interpret `legacy` as following `version`.
    ///
    /// A 1.0 blob missing fields that 1.0 guarantees gets them filled the way
    /// the 0.0 → 1.0 step would have.
    pub fn from_legacy(
        version: SchemaVersion,
        legacy: LegacyContextInitParams,
        platform: Platform,
    ) -> Self {
        match version {
            SchemaVersion::V0_0 => VersionedParams::V0(legacy),
            SchemaVersion::V1_0 => VersionedParams::V1(steps::upgrade_v0_to_v1(legacy, platform)),
            SchemaVersion::V2_0 => VersionedParams::V2(legacy.into_current_fields()),
        }
    }

    /// Apply one migration step. The current shape is returned unchanged.
    pub fn step(self, platform: Platform) -> Self {
        match self {
            VersionedParams::V0(legacy) => {
                VersionedParams::V1(steps::upgrade_v0_to_v1(legacy, platform))
            }
            VersionedParams::V1(v1) => VersionedParams::V2(steps::upgrade_v1_to_v2(v1, platform)),
            current @ VersionedParams::V2(_) => current,
        }
    }

    /// Apply steps until the current shape is reached.
    pub fn upgrade_to_current(self, platform: Platform) -> PartialContextInitParams {
        let mut state = self;
        loop {
            match state {
                VersionedParams::V2(fields) => return fields,
                older => {
                    let from = older.version();
                    state = older.step(platform);
                    tracing::debug!(
                        "Migrated context params from {} to {}",
                        from,
                        state.version()
                    );
                }
            }
        }
    }
}

impl LegacyContextInitParams {
    /// Drop the version tag and hand back the current-schema fields.
    ///
    /// A stray `n_context` is kept in the unknown-fields bag rather than
    /// lost.
    pub fn into_current_fields(self) -> PartialContextInitParams {
        let mut fields = self.fields;
        if let Some(n_context) = self.n_context {
            fields
                .extra
                .insert("n_context".to_string(), Value::from(n_context));
        }
        fields
    }
}
