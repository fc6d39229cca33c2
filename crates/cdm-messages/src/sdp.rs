//! # SDP Configuration
//!
//! The science data processor blocks carried in resource allocation
//! ([`SdpConfiguration`]) and scan configuration ([`SdpScanConfiguration`])
//! requests. Processing-block parameters and execution-block context are
//! owned by the processing scripts and are passed through as opaque JSON.

use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// SDP resources and processing requested with a subarray allocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SdpConfiguration {
    /// Interface URI, e.g. `https://schema.skao.int/ska-sdp-assignres/0.4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// The execution block the processing belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_block: Option<ExecutionBlockConfiguration>,
    /// Processing blocks to start.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processing_blocks: Vec<ProcessingBlockConfiguration>,
    /// Resources reserved for the execution block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceConfiguration>,
}

impl Validate for SdpConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.execution_block.validate()
    }
}

impl Message for SdpConfiguration {
    const KIND: MessageKind = MessageKind::SdpConfiguration;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// An execution block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionBlockConfiguration {
    /// Execution block identifier, e.g. `eb-mvp01-20200325-00001`.
    pub eb_id: String,
    /// Maximum duration in seconds.
    pub max_length: f64,
    /// Free-form context recorded with the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    /// Scan types the block may execute.
    #[serde(default)]
    pub scan_types: Vec<ScanType>,
}

impl Validate for ExecutionBlockConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        if !(self.max_length > 0.0) {
            return Err(FieldValidationError::OutOfRange {
                field: "max_length",
                value: self.max_length.to_string(),
                min: "0 (exclusive)".to_string(),
                max: "unbounded".to_string(),
            });
        }
        Ok(())
    }
}

/// A scan type of an execution block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanType {
    /// Scan type name, e.g. `science_A`.
    pub scan_type_id: String,
    /// Scan type this one inherits from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive_from: Option<String>,
}

/// When a processing script runs relative to the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// Runs during the observation.
    Realtime,
    /// Runs after the observation.
    Batch,
}

/// The script a processing block runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfiguration {
    /// When the script runs.
    pub kind: ScriptKind,
    /// Script name.
    pub name: String,
    /// Script version.
    pub version: String,
}

/// A dependency of a processing block on an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbDependency {
    /// The processing block depended on.
    pub pb_id: String,
    /// Kinds of output depended on.
    pub kind: Vec<String>,
}

/// One processing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingBlockConfiguration {
    /// Processing block identifier, e.g. `pb-mvp01-20200325-00001`.
    pub pb_id: String,
    /// Script to run.
    pub script: ScriptConfiguration,
    /// Scheduling block instances the block serves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sbi_ids: Vec<String>,
    /// Script parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Earlier processing blocks this one consumes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PbDependency>,
}

/// Resources reserved for an execution block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceConfiguration {
    /// Receptors whose data is processed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receptors: Vec<String>,
}

/// SDP part of a scan configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdpScanConfiguration {
    /// Interface URI of the SDP configure schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Scan type about to be executed.
    pub scan_type: String,
}

impl SdpScanConfiguration {
    /// Configuration selecting `scan_type`.
    pub fn new(scan_type: impl Into<String>) -> Self {
        Self {
            interface: None,
            scan_type: scan_type.into(),
        }
    }
}

impl Validate for SdpScanConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn execution_block() -> ExecutionBlockConfiguration {
        ExecutionBlockConfiguration {
            eb_id: "eb-mvp01-20200325-00001".to_string(),
            max_length: 100.0,
            context: None,
            scan_types: vec![ScanType {
                scan_type_id: "science_A".to_string(),
                derive_from: Some(".default".to_string()),
            }],
        }
    }

    #[test]
    fn script_kind_is_lowercase() {
        assert_eq!(serde_json::to_value(ScriptKind::Realtime).unwrap(), json!("realtime"));
        assert!(serde_json::from_value::<ScriptKind>(json!("REALTIME")).is_err());
    }

    #[test]
    fn empty_collections_are_omitted() {
        let sdp = SdpConfiguration {
            interface: Some("https://schema.skao.int/ska-sdp-assignres/0.4".to_string()),
            execution_block: Some(execution_block()),
            ..Default::default()
        };
        let value = serde_json::to_value(&sdp).unwrap();
        assert!(value.get("processing_blocks").is_none());
        assert!(value.get("resources").is_none());
        assert!(value["execution_block"].get("context").is_none());
    }

    #[test]
    fn opaque_parameters_round_trip() {
        let pb = ProcessingBlockConfiguration {
            pb_id: "pb-mvp01-20200325-00001".to_string(),
            script: ScriptConfiguration {
                kind: ScriptKind::Batch,
                name: "ical".to_string(),
                version: "0.1.0".to_string(),
            },
            sbi_ids: vec!["sbi-mvp01-20200325-00001".to_string()],
            parameters: Some(json!({"nested": {"anything": [1, 2, null]}})),
            dependencies: vec![PbDependency {
                pb_id: "pb-mvp01-20200325-00000".to_string(),
                kind: vec!["visibilities".to_string()],
            }],
        };
        let back: ProcessingBlockConfiguration =
            serde_json::from_value(serde_json::to_value(&pb).unwrap()).unwrap();
        assert_eq!(back, pb);
    }

    #[test]
    fn max_length_must_be_positive() {
        let mut eb = execution_block();
        assert!(eb.validate().is_ok());
        eb.max_length = 0.0;
        assert!(eb.validate().is_err());
    }
}
