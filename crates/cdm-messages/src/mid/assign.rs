//! Mid subarray resource allocation.

use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};

use crate::common::{check_subarray_id, DishAllocation};
use crate::sdp::SdpConfiguration;

/// Allocate dishes (and optionally SDP processing) to a Mid subarray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignResourcesRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-tmc-assignresources/2.1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Subarray to allocate to, 1..=16.
    pub subarray_id: u8,
    /// Dishes to allocate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<DishAllocation>,
    /// SDP resources and processing blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<SdpConfiguration>,
}

impl AssignResourcesRequest {
    /// Allocate `dish` to `subarray_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError::OutOfRange`] for an invalid subarray.
    pub fn new(subarray_id: u8, dish: DishAllocation) -> Result<Self, FieldValidationError> {
        check_subarray_id(subarray_id)?;
        Ok(Self {
            interface: None,
            transaction_id: None,
            subarray_id,
            dish: Some(dish),
            sdp: None,
        })
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

    /// Attach an SDP configuration.
    pub fn with_sdp(mut self, sdp: SdpConfiguration) -> Self {
        self.sdp = Some(sdp);
        self
    }
}

impl Validate for AssignResourcesRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        check_subarray_id(self.subarray_id)?;
        self.dish.validate()?;
        self.sdp.validate()
    }
}

impl Message for AssignResourcesRequest {
    const KIND: MessageKind = MessageKind::AssignResourcesRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}
