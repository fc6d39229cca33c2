//! Mid CSP configuration converter.
//!
//! Before `ska-csp-configure/2.0` the scan configuration identifier in
//! `common` was named `id`.

use cdm_core::convert::transform::{is_legacy_layout, rename_keys};
use cdm_core::FieldValidationError;
use cdm_messages::CspConfiguration;
use serde_json::Value;

use super::base;
use crate::registry::Converter;

const LEGACY_COMMON_KEYS: &[(&str, &str)] = &[("config_id", "id")];
const CURRENT_COMMON_KEYS: &[(&str, &str)] = &[("id", "config_id")];

/// Converter for [`CspConfiguration`].
pub fn csp_configuration() -> Converter {
    base::<CspConfiguration>()
        .after_serialize(emit_layout)
        .before_parse(accept_layouts)
}

/// Apply the legacy `common` key names when the CSP interface predates 2.0.
pub fn emit_layout(csp: &mut Value) -> Result<(), FieldValidationError> {
    if is_legacy_layout(csp) {
        if let Some(common) = csp.get_mut("common") {
            rename_keys(common, LEGACY_COMMON_KEYS);
        }
    }
    Ok(())
}

/// Restore the current `common` key names.
pub fn accept_layouts(csp: &mut Value) -> Result<(), FieldValidationError> {
    if let Some(common) = csp.get_mut("common") {
        if common.get("config_id").is_none() {
            rename_keys(common, CURRENT_COMMON_KEYS);
        }
    }
    Ok(())
}
