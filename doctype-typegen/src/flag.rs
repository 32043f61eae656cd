//! Lenient boolean decoding for Frappe-style `0`/`1` flags.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
    Null(()),
}

impl RawFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Text(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Self::Null(()) => false,
        }
    }
}

/// Deserialises a flag stored as a boolean, an integer, or a numeric string.
///
/// Frappe persists checkboxes as `0`/`1`; environment overrides arrive as
/// strings. `null` is treated as unset.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    RawFlag::deserialize(deserializer).map(|raw| raw.is_set())
}
