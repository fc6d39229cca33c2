//! # Strict Tier Derivation
//!
//! The strict tier of a schema is the published document with unknown
//! object keys forbidden: every object schema that declares `properties`
//! and leaves `additionalProperties` unspecified gets
//! `additionalProperties: false`. Object schemas without `properties`
//! (opaque payloads such as processing-block parameters) stay open, and an
//! explicit `additionalProperties` is never overridden.

use serde_json::Value;

/// Keywords whose value is a single subschema.
const SUBSCHEMA_KEYWORDS: &[&str] = &["items", "additionalProperties", "not", "if", "then", "else"];

/// Keywords whose value is an array of subschemas.
const SUBSCHEMA_ARRAY_KEYWORDS: &[&str] = &["prefixItems", "anyOf", "oneOf", "allOf"];

/// Keywords whose value is a map of named subschemas.
const SUBSCHEMA_MAP_KEYWORDS: &[&str] = &["properties", "patternProperties", "$defs", "definitions"];

/// Derive the strict tier of `schema`.
pub fn strict_variant(schema: &Value) -> Value {
    let mut strict = schema.clone();
    lock_object_node(&mut strict);
    strict
}

/// Count the object schemas [`strict_variant`] would lock down.
pub fn open_object_count(schema: &Value) -> usize {
    let Some(obj) = schema.as_object() else {
        return 0;
    };
    let here = usize::from(
        obj.get("properties").is_some_and(Value::is_object) && !obj.contains_key("additionalProperties"),
    );
    here + children(obj).map(open_object_count).sum::<usize>()
}

fn lock_object_node(node: &mut Value) {
    let Some(obj) = node.as_object_mut() else {
        return;
    };

    if obj.get("properties").is_some_and(Value::is_object) && !obj.contains_key("additionalProperties") {
        obj.insert("additionalProperties".to_string(), Value::Bool(false));
    }

    for key in SUBSCHEMA_KEYWORDS {
        if let Some(child) = obj.get_mut(*key) {
            lock_object_node(child);
        }
    }
    for key in SUBSCHEMA_ARRAY_KEYWORDS {
        if let Some(Value::Array(items)) = obj.get_mut(*key) {
            items.iter_mut().for_each(lock_object_node);
        }
    }
    for key in SUBSCHEMA_MAP_KEYWORDS {
        if let Some(Value::Object(map)) = obj.get_mut(*key) {
            map.values_mut().for_each(lock_object_node);
        }
    }
}

fn children(obj: &serde_json::Map<String, Value>) -> impl Iterator<Item = &Value> {
    let single = SUBSCHEMA_KEYWORDS.iter().filter_map(|k| obj.get(*k));
    let arrays = SUBSCHEMA_ARRAY_KEYWORDS
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_array))
        .flatten();
    let maps = SUBSCHEMA_MAP_KEYWORDS
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_object))
        .flat_map(|m| m.values());
    single.chain(arrays).chain(maps)
}
