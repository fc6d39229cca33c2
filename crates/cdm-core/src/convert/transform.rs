//! # Structure Transforms
//!
//! In-place edits of a JSON-able structure, composed into the ordered
//! per-type pipelines the codec runs after serializing and before parsing.
//! Every edit keeps the relative order of the keys it does not touch, so
//! the emitted JSON follows field declaration order.

use serde_json::{Map, Value};

use crate::error::FieldValidationError;
use crate::interface::InterfaceUri;

/// One pipeline step.
pub type Transform = fn(&mut Value) -> Result<(), FieldValidationError>;

/// First interface major version that uses the current key layout.
pub const CURRENT_LAYOUT_MAJOR: u32 = 2;

/// The interface URI string declared by a structure, if any.
pub fn interface_of(value: &Value) -> Option<&str> {
    value.get("interface").and_then(Value::as_str)
}

/// The parsed interface declared by a structure, if present and well-formed.
pub fn declared_interface(value: &Value) -> Option<InterfaceUri> {
    interface_of(value).and_then(|uri| InterfaceUri::parse(uri).ok())
}

/// Whether the structure uses the legacy key layout.
///
/// Messages without an interface, or with a major version below
/// [`CURRENT_LAYOUT_MAJOR`], predate the current layout.
pub fn is_legacy_layout(value: &Value) -> bool {
    match interface_of(value) {
        None => true,
        Some(uri) => InterfaceUri::parse(uri)
            .map(|parsed| parsed.major() < CURRENT_LAYOUT_MAJOR)
            .unwrap_or(false),
    }
}

/// Rename object keys, keeping every key in its position.
///
/// Keys absent from the object are ignored; non-objects are left alone.
pub fn rename_keys(value: &mut Value, renames: &[(&str, &str)]) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    if !renames.iter().any(|(from, _)| map.contains_key(*from)) {
        return;
    }
    let renamed: Map<String, Value> = std::mem::take(map)
        .into_iter()
        .map(|(key, v)| {
            let key = renames
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| (*to).to_string())
                .unwrap_or(key);
            (key, v)
        })
        .collect();
    *map = renamed;
}

/// Remove object keys, keeping the remaining keys in order.
pub fn remove_keys(value: &mut Value, keys: &[&str]) {
    if let Some(map) = value.as_object_mut() {
        if keys.iter().any(|k| map.contains_key(*k)) {
            let kept: Map<String, Value> = std::mem::take(map)
                .into_iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .collect();
            *map = kept;
        }
    }
}

/// Insert `key` directly after `anchor`, or at the end if `anchor` is absent.
pub fn insert_after(value: &mut Value, anchor: &str, key: &str, inserted: Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    let mut rebuilt = Map::new();
    let mut pending = Some(inserted);
    for (k, v) in std::mem::take(map) {
        let is_anchor = k == anchor;
        if k != key {
            rebuilt.insert(k, v);
        }
        if is_anchor {
            if let Some(value) = pending.take() {
                rebuilt.insert(key.to_string(), value);
            }
        }
    }
    if let Some(value) = pending {
        rebuilt.insert(key.to_string(), value);
    }
    *map = rebuilt;
}

/// Drop top-level members whose value is `null`.
///
/// Optional fields are never emitted as `null`; opaque nested payloads are
/// left untouched.
pub fn strip_nulls(value: &mut Value) -> Result<(), FieldValidationError> {
    if let Some(map) = value.as_object() {
        if map.values().any(Value::is_null) {
            let nulls: Vec<String> = map
                .iter()
                .filter(|(_, v)| v.is_null())
                .map(|(k, _)| k.clone())
                .collect();
            let keys: Vec<&str> = nulls.iter().map(String::as_str).collect();
            remove_keys(value, &keys);
        }
    }
    Ok(())
}
