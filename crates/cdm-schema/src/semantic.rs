//! # Semantic Rules
//!
//! Cross-field business rules that JSON Schema cannot express: counts that
//! must agree, identifiers that must be unique, references that must
//! resolve. Rules are grouped by interface namespace (the message-kind part
//! of an interface URI) and only namespaces on the allow-list are checked.
//!
//! Each rule is evaluated against the subtree at its base pointer. A rule
//! whose subtree is absent passes: presence is the schema's concern.

use std::collections::HashSet;

use cdm_core::InterfaceUri;
use serde_json::Value;

use crate::error::SemanticValidationError;

/// Maximum number of dishes a Mid subarray may be allocated.
pub const MAX_RECEPTORS: usize = 4;

/// Maximum number of frequency slice processors in one CSP configuration.
pub const MAX_FSPS: usize = 4;

/// Maximum number of Low stations per allocation or configuration.
pub const MAX_LOW_STATIONS: usize = 6;

/// Maximum number of Low visibility beams.
pub const MAX_VIS_BEAMS: usize = 1;

/// One cross-field rule.
#[derive(Debug, Clone)]
pub struct SemanticRule {
    base: String,
    description: &'static str,
    check: fn(&Value) -> bool,
}

impl SemanticRule {
    fn new(base: impl Into<String>, description: &'static str, check: fn(&Value) -> bool) -> Self {
        Self {
            base: base.into(),
            description,
            check,
        }
    }

    /// The message reported when the rule is violated.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// JSON Pointer to the subtree the rule inspects.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether `instance` satisfies the rule.
    pub fn holds(&self, instance: &Value) -> bool {
        match instance.pointer(&self.base) {
            Some(subtree) => (self.check)(subtree),
            None => true,
        }
    }
}

#[derive(Debug, Clone)]
struct RuleGroup {
    namespace: &'static str,
    rules: Vec<SemanticRule>,
}

/// The allow-listed semantic rules, by interface namespace.
#[derive(Debug, Clone, Default)]
pub struct SemanticRuleSet {
    groups: Vec<RuleGroup>,
}

impl SemanticRuleSet {
    /// A rule set covering no namespace.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The observatory rule catalog.
    pub fn standard() -> Self {
        Self::empty()
            .with_rules("ska-tmc-assignresources", mid_assign_rules())
            .with_rules("ska-tmc-configure", mid_configure_rules())
            .with_rules("ska-csp-configure", csp_rules(""))
            .with_rules("ska-low-tmc-assignresources", low_assign_rules())
            .with_rules("ska-low-tmc-configure", low_csp_rules("/csp"))
            .with_rules("ska-low-csp-configure", low_csp_rules(""))
    }

    fn with_rules(mut self, namespace: &'static str, rules: Vec<SemanticRule>) -> Self {
        self.groups.push(RuleGroup { namespace, rules });
        self
    }

    /// Allow-listed namespaces, in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().map(|g| g.namespace)
    }

    /// Rules applied to documents declaring `uri`.
    pub fn rules_for(&self, uri: &str) -> &[SemanticRule] {
        InterfaceUri::parse(uri)
            .ok()
            .and_then(|parsed| self.groups.iter().find(|g| g.namespace == parsed.kind()))
            .map(|g| g.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `uri` belongs to an allow-listed namespace.
    pub fn covers(&self, uri: &str) -> bool {
        InterfaceUri::parse(uri)
            .map(|parsed| self.groups.iter().any(|g| g.namespace == parsed.kind()))
            .unwrap_or(false)
    }

    /// Apply every rule for `uri` to `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticValidationError`] listing every violated rule in
    /// evaluation order.
    pub fn validate(&self, uri: &str, instance: &Value) -> Result<(), SemanticValidationError> {
        let violations: Vec<String> = self
            .rules_for(uri)
            .iter()
            .filter(|rule| !rule.holds(instance))
            .map(|rule| rule.description.to_string())
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SemanticValidationError::new(uri, violations))
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

fn mid_assign_rules() -> Vec<SemanticRule> {
    vec![
        SemanticRule::new(
            "/dish",
            "receptor_ids are too many, current limit is 4",
            |dish| array_len(dish, "receptor_ids") <= MAX_RECEPTORS,
        ),
        SemanticRule::new("/dish", "receptor_ids must be unique", |dish| {
            all_unique(dish.get("receptor_ids").and_then(Value::as_array))
        }),
        SemanticRule::new(
            "/sdp/execution_block",
            "scan_type_id must be unique within an execution block",
            |eb| {
                let ids = eb.get("scan_types").and_then(Value::as_array).map(|types| {
                    types
                        .iter()
                        .filter_map(|t| t.get("scan_type_id"))
                        .cloned()
                        .collect::<Vec<_>>()
                });
                all_unique(ids.as_ref())
            },
        ),
    ]
}

fn mid_configure_rules() -> Vec<SemanticRule> {
    let mut rules = vec![SemanticRule::new(
        "",
        "dish receiver_band must match csp frequency_band",
        |request| {
            let dish_band = request.pointer("/dish/receiver_band");
            let csp_band = request.pointer("/csp/common/frequency_band");
            match (dish_band, csp_band) {
                (Some(dish), Some(csp)) => dish == csp,
                _ => true,
            }
        },
    )];
    rules.extend(csp_rules("/csp"));
    rules
}

fn csp_rules(base: &str) -> Vec<SemanticRule> {
    vec![
        SemanticRule::new(
            format!("{base}/common"),
            "band_5_tuning is required for frequency_band 5a and 5b",
            |common| {
                let band = common.get("frequency_band").and_then(Value::as_str);
                !matches!(band, Some("5a" | "5b")) || common.get("band_5_tuning").is_some()
            },
        ),
        SemanticRule::new(format!("{base}/cbf"), "fsp_id must be unique", |cbf| {
            all_unique(collect_field(cbf, "fsp", "fsp_id").as_ref())
        }),
        SemanticRule::new(
            format!("{base}/cbf"),
            "fsp are too many, current limit is 4",
            |cbf| array_len(cbf, "fsp") <= MAX_FSPS,
        ),
        SemanticRule::new(
            format!("{base}/midcbf/correlation"),
            "fsp_ids must not be shared between processing regions",
            |correlation| {
                let ids: Vec<Value> = correlation
                    .get("processing_regions")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .filter_map(|region| region.get("fsp_ids").and_then(Value::as_array))
                    .flatten()
                    .cloned()
                    .collect();
                all_unique(Some(&ids))
            },
        ),
    ]
}

fn low_assign_rules() -> Vec<SemanticRule> {
    vec![
        SemanticRule::new(
            "/mccs",
            "subarray_beam_ids, station_ids and channel_blocks must have the same length",
            |mccs| {
                let beams = array_len(mccs, "subarray_beam_ids");
                beams == array_len(mccs, "station_ids") && beams == array_len(mccs, "channel_blocks")
            },
        ),
        SemanticRule::new(
            "/mccs",
            "station_ids are too many, current limit is 6",
            |mccs| {
                let total: usize = mccs
                    .get("station_ids")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .map(|group| group.as_array().map_or(0, Vec::len))
                    .sum();
                total <= MAX_LOW_STATIONS
            },
        ),
    ]
}

fn low_csp_rules(base: &str) -> Vec<SemanticRule> {
    vec![
        SemanticRule::new(
            format!("{base}/lowcbf"),
            "vis stn_beams are too many, current limit is 1",
            |lowcbf| {
                lowcbf
                    .pointer("/vis/stn_beams")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len)
                    <= MAX_VIS_BEAMS
            },
        ),
        SemanticRule::new(
            format!("{base}/lowcbf"),
            "vis stn_beam_id must reference a configured station beam",
            |lowcbf| {
                let configured: HashSet<u64> = lowcbf
                    .pointer("/stations/stn_beams")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .filter_map(|beam| beam.get("beam_id").and_then(Value::as_u64))
                    .collect();
                lowcbf
                    .pointer("/vis/stn_beams")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .filter_map(|beam| beam.get("stn_beam_id").and_then(Value::as_u64))
                    .all(|id| configured.contains(&id))
            },
        ),
        SemanticRule::new(
            format!("{base}/lowcbf/stations"),
            "stns are too many, current limit is 6",
            |stations| array_len(stations, "stns") <= MAX_LOW_STATIONS,
        ),
    ]
}

fn array_len(value: &Value, key: &str) -> usize {
    value.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

fn collect_field(value: &Value, array: &str, field: &str) -> Option<Vec<Value>> {
    value.get(array).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|item| item.get(field))
            .cloned()
            .collect()
    })
}

fn all_unique(values: Option<&Vec<Value>>) -> bool {
    let Some(values) = values else {
        return true;
    };
    let mut seen = HashSet::new();
    values.iter().all(|v| seen.insert(v.to_string()))
}
