//! Schema version tags.

use serde_json::Value;
use std::fmt;

use crate::config::constants::schema;

/// Known schema versions, ordered oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    /// No `version` field at all.
    V0_0,
    V1_0,
    V2_0,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2_0;

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V0_0 => schema::UNVERSIONED,
            SchemaVersion::V1_0 => schema::V1_0,
            SchemaVersion::V2_0 => schema::V2_0,
        }
    }

    pub fn is_current(self) -> bool {
        self == Self::CURRENT
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a blob's `version` field says about its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionTag {
    Known(SchemaVersion),
    /// A tag this build does not know (newer release, or garbage). No step
    /// applies; the value is only stamped.
    Unrecognized(String),
}

impl VersionTag {
    /// Classify a raw `version` value.
    ///
    /// Absent, `null`, `false`, `0` and `""` all mean unversioned. Numeric
    /// tags (`2`, `"2"`, `1.0`) are matched by value.
    pub fn classify(raw: Option<&Value>) -> VersionTag {
        let text = match raw {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                return VersionTag::Known(SchemaVersion::V0_0)
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return VersionTag::Known(SchemaVersion::V0_0)
            }
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return VersionTag::Unrecognized(other.to_string()),
        };

        match text.parse::<f64>() {
            Ok(v) if v == 0.0 => VersionTag::Known(SchemaVersion::V0_0),
            Ok(v) if v == 1.0 => VersionTag::Known(SchemaVersion::V1_0),
            Ok(v) if v == 2.0 => VersionTag::Known(SchemaVersion::V2_0),
            _ => VersionTag::Unrecognized(text),
        }
    }
}
