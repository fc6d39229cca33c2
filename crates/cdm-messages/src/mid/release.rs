//! Mid subarray resource release.

use cdm_core::convert::is_false;
use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};

use crate::common::{check_subarray_id, DishAllocation};

/// Release some or all resources of a Mid subarray.
///
/// Either `release_all` is set, or `dish` names what to release. When
/// `release_all` is set any dish allocation is ignored and not emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseResourcesRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-tmc-releaseresources/2.1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Subarray to release from, 1..=16.
    pub subarray_id: u8,
    /// Release everything allocated to the subarray.
    #[serde(default, skip_serializing_if = "is_false")]
    pub release_all: bool,
    /// Dishes to release when `release_all` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<DishAllocation>,
}

impl ReleaseResourcesRequest {
    /// Build a release request.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError::MissingField`] when `release_all` is
    /// false and no dish allocation is given, and
    /// [`FieldValidationError::OutOfRange`] for an invalid subarray.
    pub fn new(
        subarray_id: u8,
        release_all: bool,
        dish: Option<DishAllocation>,
    ) -> Result<Self, FieldValidationError> {
        let request = Self {
            interface: None,
            transaction_id: None,
            subarray_id,
            release_all,
            dish,
        };
        request.validate()?;
        Ok(request)
    }

    /// Release everything allocated to `subarray_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError::OutOfRange`] for an invalid subarray.
    pub fn all(subarray_id: u8) -> Result<Self, FieldValidationError> {
        Self::new(subarray_id, true, None)
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

impl Validate for ReleaseResourcesRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        check_subarray_id(self.subarray_id)?;
        if !self.release_all && self.dish.is_none() {
            return Err(FieldValidationError::MissingField {
                message_type: "ReleaseResourcesRequest",
                field: "dish",
            });
        }
        self.dish.validate()
    }
}

impl Message for ReleaseResourcesRequest {
    const KIND: MessageKind = MessageKind::ReleaseResourcesRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}
