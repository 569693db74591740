//! Schema migration for persisted context parameters.
//!
//! A persisted blob may come from any release: unversioned, 1.0, 2.0, or a
//! tag this build does not recognize. [`migrate_context_init_params`] always
//! returns a complete current-version value:
//!
//! ```text
//! "0.0" ──v0_to_v1──▶ "1.0" ──v1_to_v2──▶ "2.0" ──finalize──▶ ContextInitParams
//! ```
//!
//! Unrecognized tags skip every step and are only stamped with the current
//! version. A field with the wrong type is dropped and takes its default;
//! the rest of the blob is kept. A blob that cannot be decoded at all falls
//! back to [`create_default_context_init_params`], since a broken settings
//! blob must not block startup.
//!
//! # Example
//!
//! ```
//! use inference_config_core::migration::migrate_context_init_params;
//! use inference_config_core::types::Platform;
//! use serde_json::json;
//!
//! let params = migrate_context_init_params(&json!({ "n_context": 4096 }), Platform::Ios);
//! assert_eq!(params.n_ctx, 4096);
//! assert_eq!(params.version, "2.0");
//! ```

mod legacy;
mod steps;
mod version;


pub use legacy::{LegacyContextInitParams, ParamsV1, VersionedParams};
pub use steps::{upgrade_v0_to_v1, upgrade_v1_to_v2};
pub use version::{SchemaVersion, VersionTag};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ParamsError;
use crate::params::{create_context_init_params, create_default_context_init_params, json_kind};
use crate::types::{ContextInitParams, Platform};

/// Upgrade any persisted blob to the current schema. Never fails.
pub fn migrate_context_init_params(blob: &Value, platform: Platform) -> ContextInitParams {
    let result = match try_migrate_context_init_params(blob, platform) {
        Err(ParamsError::Malformed(e)) => {
            warn!("Persisted context params have mistyped fields: {}", e);
            try_migrate_context_init_params(&drop_malformed_fields(blob), platform)
        }
        other => other,
    };
    match result {
        Ok(params) => params,
        Err(e) => {
            warn!(
                "Persisted context params unusable, falling back to defaults: {}",
                e
            );
            create_default_context_init_params(platform)
        }
    }
}

/// Same as [`migrate_context_init_params`] for a JSON string.
pub fn migrate_context_init_params_str(json: &str, platform: Platform) -> ContextInitParams {
    match serde_json::from_str::<Value>(json) {
        Ok(blob) => migrate_context_init_params(&blob, platform),
        Err(e) => {
            warn!(
                "Persisted context params are not valid JSON, falling back to defaults: {}",
                e
            );
            create_default_context_init_params(platform)
        }
    }
}

/// Upgrade a blob, reporting why it could not be decoded.
///
/// # Errors
/// - `ParamsError::NotAnObject` if the blob is not a JSON object
/// - `ParamsError::Malformed` if a known field has the wrong type
pub fn try_migrate_context_init_params(
    blob: &Value,
    platform: Platform,
) -> Result<ContextInitParams, ParamsError> {
    if !blob.is_object() {
        return Err(ParamsError::NotAnObject(json_kind(blob)));
    }
    let legacy: LegacyContextInitParams = serde_json::from_value(blob.clone())?;

    let fields = match VersionTag::classify(legacy.version.as_ref()) {
        VersionTag::Known(version) => {
            if !version.is_current() {
                info!(
                    "Migrating context params from {} to {}",
                    version,
                    SchemaVersion::CURRENT
                );
            }
            VersionedParams::from_legacy(version, legacy, platform).upgrade_to_current(platform)
        }
        VersionTag::Unrecognized(tag) => {
            warn!(
                "Unrecognized context params version '{}', stamping {} without migrating",
                tag,
                SchemaVersion::CURRENT
            );
            legacy.into_current_fields()
        }
    };

    let params = create_context_init_params(fields, platform);
    debug!("Context params at version {}", params.version);
    Ok(params)
}

/// Copy of `blob` without the fields that fail to decode on their own.
fn drop_malformed_fields(blob: &Value) -> Value {
    let Some(object) = blob.as_object() else {
        return blob.clone();
    };
    let kept: Map<String, Value> = object
        .iter()
        .filter(|(key, value)| {
            let single = Value::Object(Map::from_iter([((*key).clone(), (*value).clone())]));
            let decodes = serde_json::from_value::<LegacyContextInitParams>(single).is_ok();
            if !decodes {
                warn!("Dropping persisted field '{}': unexpected value {}", key, value);
            }
            decodes
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(kept)
}

/// True if the blob is not already tagged with the current version.
pub fn needs_migration(blob: &Value) -> bool {
    VersionTag::classify(blob.get("version")) != VersionTag::Known(SchemaVersion::CURRENT)
}
