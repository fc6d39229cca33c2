//! Low subarray resource allocation.

use cdm_core::{check_range, FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};

use super::{MAX_SUBARRAY_BEAM_ID, MIN_SUBARRAY_BEAM_ID};
use crate::common::check_subarray_id;
use crate::sdp::SdpConfiguration;

/// Allocate stations and beams to a Low subarray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowAssignResourcesRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-low-tmc-assignresources/4.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Subarray to allocate to, 1..=16.
    pub subarray_id: u8,
    /// Station and beam allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mccs: Option<MccsAllocation>,
    /// SDP resources and processing blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<SdpConfiguration>,
}

impl LowAssignResourcesRequest {
    /// Allocate `mccs` to `subarray_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError`] for an invalid subarray or beam.
    pub fn new(subarray_id: u8, mccs: MccsAllocation) -> Result<Self, FieldValidationError> {
        let request = Self {
            interface: None,
            transaction_id: None,
            subarray_id,
            mccs: Some(mccs),
            sdp: None,
        };
        request.validate()?;
        Ok(request)
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

impl Validate for LowAssignResourcesRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        check_subarray_id(self.subarray_id)?;
        self.mccs.validate()?;
        self.sdp.validate()
    }
}

impl Message for LowAssignResourcesRequest {
    const KIND: MessageKind = MessageKind::LowAssignResourcesRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// Station and beam allocation. The three lists are parallel: entry `i`
/// of each describes subarray beam `subarray_beam_ids[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MccsAllocation {
    /// Subarray beams, 1..=48.
    pub subarray_beam_ids: Vec<u8>,
    /// Stations feeding each beam.
    pub station_ids: Vec<Vec<u16>>,
    /// Channel blocks for each beam.
    pub channel_blocks: Vec<u16>,
}

impl Validate for MccsAllocation {
    fn validate(&self) -> Result<(), FieldValidationError> {
        for id in &self.subarray_beam_ids {
            check_range("subarray_beam_ids", *id, MIN_SUBARRAY_BEAM_ID, MAX_SUBARRAY_BEAM_ID)?;
        }
        Ok(())
    }
}
