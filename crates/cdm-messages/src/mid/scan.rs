//! Start of a scan.

use cdm_core::convert::duration_secs;
use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Start a scan on a configured subarray.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-tmc-scan/2.1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Scan number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<u64>,
    /// Scan length; emitted as seconds.
    #[serde(default, with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub scan_duration: Option<Duration>,
}

impl ScanRequest {
    /// Request scan `scan_id`.
    pub fn new(scan_id: u64) -> Self {
        Self {
            scan_id: Some(scan_id),
            ..Self::default()
        }
    }

    /// Legacy request carrying only a scan duration.
    pub fn with_duration(scan_duration: Duration) -> Self {
        Self {
            scan_duration: Some(scan_duration),
            ..Self::default()
        }
    }

    /// Declare the interface URI.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Set the transaction identifier.
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }
}

impl Validate for ScanRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        match self.scan_duration {
            Some(d) if d < Duration::zero() => Err(FieldValidationError::OutOfRange {
                field: "scan_duration",
                value: d.to_string(),
                min: "0".to_string(),
                max: "unbounded".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Message for ScanRequest {
    const KIND: MessageKind = MessageKind::ScanRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}
