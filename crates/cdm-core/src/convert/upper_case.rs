//! Case-folded string fields.
//!
//! The value is stored lower-cased in memory and emitted upper-cased, so
//! `"horizon"`, `"Horizon"` and `"HORIZON"` all load to the same object.
//! Only ASCII letters are folded; tags on the wire are ASCII, and a full
//! Unicode fold is not idempotent (`ſ` upper-cases to `S`).

use serde::{Deserialize, Deserializer, Serializer};

/// Fold a tag for comparison against a closed set of upper-case tags.
pub fn fold(tag: &str) -> String {
    tag.trim().to_ascii_uppercase()
}

/// Whether `candidate` names `tag`, ignoring case on both sides.
pub fn matches(candidate: &str, tag: &str) -> bool {
    fold(candidate) == fold(tag)
}

/// Serialize upper-cased.
pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_ascii_uppercase())
}

/// Deserialize and store lower-cased.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.to_ascii_lowercase())
}
