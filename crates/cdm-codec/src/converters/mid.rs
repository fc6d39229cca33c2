//! # Mid Request Converters
//!
//! | Current key | Legacy key |
//! |---|---|
//! | `subarray_id` | `subarrayID` |
//! | `dish.receptor_ids` | `dish.receptorIDList` |
//! | `release_all` | `releaseALL` |
//! | `scan_duration` | `scanDuration` |
//!
//! The current release layout lists the dishes to release as a top-level
//! `receptor_ids` array instead of a `dish` object.

use cdm_core::convert::transform::{insert_after, is_legacy_layout, remove_keys, rename_keys};
use cdm_core::FieldValidationError;
use cdm_messages::{AssignResourcesRequest, ConfigureRequest, ReleaseResourcesRequest, ScanRequest};
use serde_json::{json, Value};

use super::{base, csp};
use crate::registry::Converter;

const LEGACY_SUBARRAY: &[(&str, &str)] = &[("subarray_id", "subarrayID")];
const LEGACY_DISH: &[(&str, &str)] = &[("receptor_ids", "receptorIDList")];
const LEGACY_RELEASE: &[(&str, &str)] = &[("subarray_id", "subarrayID"), ("release_all", "releaseALL")];
const LEGACY_SCAN: &[(&str, &str)] = &[("scan_duration", "scanDuration")];

const CURRENT_SUBARRAY: &[(&str, &str)] = &[("subarrayID", "subarray_id")];
const CURRENT_DISH: &[(&str, &str)] = &[("receptorIDList", "receptor_ids")];
const CURRENT_RELEASE: &[(&str, &str)] = &[("subarrayID", "subarray_id"), ("releaseALL", "release_all")];
const CURRENT_SCAN: &[(&str, &str)] = &[("scanDuration", "scan_duration")];

fn rename_dish(value: &mut Value, renames: &[(&str, &str)]) {
    if let Some(dish) = value.get_mut("dish") {
        rename_keys(dish, renames);
    }
}

// ---------------------------------------------------------------------------
// AssignResources
// ---------------------------------------------------------------------------

/// Converter for [`AssignResourcesRequest`].
pub fn assign_resources() -> Converter {
    base::<AssignResourcesRequest>()
        .after_serialize(emit_assign_layout)
        .before_parse(accept_assign_layouts)
}

fn emit_assign_layout(value: &mut Value) -> Result<(), FieldValidationError> {
    if is_legacy_layout(value) {
        rename_keys(value, LEGACY_SUBARRAY);
        rename_dish(value, LEGACY_DISH);
    }
    Ok(())
}

fn accept_assign_layouts(value: &mut Value) -> Result<(), FieldValidationError> {
    rename_keys(value, CURRENT_SUBARRAY);
    rename_dish(value, CURRENT_DISH);
    Ok(())
}

// ---------------------------------------------------------------------------
// ReleaseResources
// ---------------------------------------------------------------------------

/// Converter for [`ReleaseResourcesRequest`].
pub fn release_resources() -> Converter {
    base::<ReleaseResourcesRequest>()
        .after_serialize(drop_released_dish)
        .after_serialize(emit_release_layout)
        .before_parse(accept_release_layouts)
}

/// With `release_all` set nothing else names resources to release.
fn drop_released_dish(value: &mut Value) -> Result<(), FieldValidationError> {
    if value.get("release_all").and_then(Value::as_bool) == Some(true) {
        remove_keys(value, &["dish"]);
    }
    Ok(())
}

fn emit_release_layout(value: &mut Value) -> Result<(), FieldValidationError> {
    if is_legacy_layout(value) {
        rename_keys(value, LEGACY_RELEASE);
        rename_dish(value, LEGACY_DISH);
        return Ok(());
    }

    let Some(dish) = value.get("dish") else {
        return Ok(());
    };
    let receptor_ids = dish.get("receptor_ids").cloned().unwrap_or_else(|| json!([]));
    remove_keys(value, &["dish"]);
    insert_after(value, "subarray_id", "receptor_ids", receptor_ids);
    Ok(())
}

fn accept_release_layouts(value: &mut Value) -> Result<(), FieldValidationError> {
    rename_keys(value, CURRENT_RELEASE);
    rename_dish(value, CURRENT_DISH);

    if value.get("dish").is_none() {
        if let Some(receptor_ids) = value.get("receptor_ids").cloned() {
            remove_keys(value, &["receptor_ids"]);
            if let Some(map) = value.as_object_mut() {
                map.insert("dish".to_string(), json!({ "receptor_ids": receptor_ids }));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Configure
// ---------------------------------------------------------------------------

/// Converter for [`ConfigureRequest`]. The embedded CSP block follows its
/// own interface.
pub fn configure() -> Converter {
    base::<ConfigureRequest>()
        .after_serialize(emit_configure_layout)
        .before_parse(accept_configure_layouts)
}

fn emit_configure_layout(value: &mut Value) -> Result<(), FieldValidationError> {
    match value.get_mut("csp") {
        Some(csp) => csp::emit_layout(csp),
        None => Ok(()),
    }
}

fn accept_configure_layouts(value: &mut Value) -> Result<(), FieldValidationError> {
    match value.get_mut("csp") {
        Some(csp) => csp::accept_layouts(csp),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Converter for [`ScanRequest`].
pub fn scan() -> Converter {
    base::<ScanRequest>()
        .after_serialize(emit_scan_layout)
        .before_parse(accept_scan_layouts)
}

fn emit_scan_layout(value: &mut Value) -> Result<(), FieldValidationError> {
    if is_legacy_layout(value) {
        rename_keys(value, LEGACY_SCAN);
    }
    Ok(())
}

fn accept_scan_layouts(value: &mut Value) -> Result<(), FieldValidationError> {
    rename_keys(value, CURRENT_SCAN);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASE_2_1: &str = "https://schema.skao.int/ska-tmc-releaseresources/2.1";

    fn run_after(converter: &Converter, mut value: Value) -> Value {
        converter.finish_serialize(&mut value).unwrap();
        value
    }

    fn run_before(converter: &Converter, mut value: Value) -> Value {
        converter.prepare_parse(&mut value).unwrap();
        value
    }

    #[test]
    fn legacy_assign_keys() {
        let value = run_after(
            &assign_resources(),
            json!({"subarray_id": 1, "dish": {"receptor_ids": ["0001", "0002"]}}),
        );
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"subarrayID":1,"dish":{"receptorIDList":["0001","0002"]}}"#
        );
        let back = run_before(&assign_resources(), value);
        assert_eq!(back, json!({"subarray_id": 1, "dish": {"receptor_ids": ["0001", "0002"]}}));
    }

    #[test]
    fn release_all_drops_dish_and_uses_legacy_flag() {
        let value = run_after(
            &release_resources(),
            json!({"subarray_id": 1, "release_all": true, "dish": {"receptor_ids": ["0001"]}}),
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"subarrayID":1,"releaseALL":true}"#);
    }

    #[test]
    fn current_release_lists_receptors_at_top_level() {
        let value = run_after(
            &release_resources(),
            json!({
                "interface": RELEASE_2_1,
                "subarray_id": 1,
                "dish": {"receptor_ids": ["SKA001"]}
            }),
        );
        assert_eq!(
            value,
            json!({"interface": RELEASE_2_1, "subarray_id": 1, "receptor_ids": ["SKA001"]})
        );
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["interface", "subarray_id", "receptor_ids"]);

        let back = run_before(&release_resources(), value);
        assert_eq!(back["dish"], json!({"receptor_ids": ["SKA001"]}));
        assert!(back.get("receptor_ids").is_none());
    }

    #[test]
    fn scan_duration_key_follows_interface() {
        let legacy = run_after(&scan(), json!({"scan_duration": 123.45}));
        assert_eq!(legacy, json!({"scanDuration": 123.45}));

        let current = run_after(
            &scan(),
            json!({"interface": "https://schema.skao.int/ska-tmc-scan/2.1", "scan_id": 1, "scan_duration": 1.5}),
        );
        assert_eq!(current["scan_duration"], json!(1.5));

        assert_eq!(run_before(&scan(), legacy), json!({"scan_duration": 123.45}));
    }
}
