//! # Message Kinds and Traits
//!
//! [`MessageKind`] is the closed set of message types the codec can be asked
//! to serialize or deserialize. The converter registry is keyed by it, so a
//! new message type is only usable once it has a variant here and a
//! registered converter.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FieldValidationError;

/// Every top-level message kind known to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    /// Mid subarray resource allocation.
    AssignResourcesRequest,
    /// Mid subarray resource release.
    ReleaseResourcesRequest,
    /// Mid scan configuration.
    ConfigureRequest,
    /// Start of a scan.
    ScanRequest,
    /// Mid CSP configuration.
    CspConfiguration,
    /// SDP resource allocation block.
    SdpConfiguration,
    /// Low subarray resource allocation.
    LowAssignResourcesRequest,
    /// Low scan configuration.
    LowConfigureRequest,
    /// Low CSP configuration.
    LowCspConfiguration,
}

impl MessageKind {
    /// Every kind, in registration order.
    pub const ALL: [MessageKind; 9] = [
        Self::AssignResourcesRequest,
        Self::ReleaseResourcesRequest,
        Self::ConfigureRequest,
        Self::ScanRequest,
        Self::CspConfiguration,
        Self::SdpConfiguration,
        Self::LowAssignResourcesRequest,
        Self::LowConfigureRequest,
        Self::LowCspConfiguration,
    ];

    /// The message type name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::AssignResourcesRequest => "AssignResourcesRequest",
            Self::ReleaseResourcesRequest => "ReleaseResourcesRequest",
            Self::ConfigureRequest => "ConfigureRequest",
            Self::ScanRequest => "ScanRequest",
            Self::CspConfiguration => "CspConfiguration",
            Self::SdpConfiguration => "SdpConfiguration",
            Self::LowAssignResourcesRequest => "LowAssignResourcesRequest",
            Self::LowConfigureRequest => "LowConfigureRequest",
            Self::LowCspConfiguration => "LowCspConfiguration",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Object-model invariants of a type and its nested sub-messages.
pub trait Validate {
    /// Check ranges, required combinations and mutual exclusivity.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    fn validate(&self) -> Result<(), FieldValidationError>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), FieldValidationError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// A top-level message the codec can marshal.
///
/// The serde implementations are the structural half of the type's
/// converter; the registered pipeline in `cdm-codec` supplies the rest.
pub trait Message: Serialize + DeserializeOwned + Validate + Clone + PartialEq + std::fmt::Debug + 'static {
    /// The registry key for this type.
    const KIND: MessageKind;

    /// The interface URI this message claims to conform to, if any.
    fn interface(&self) -> Option<&str>;
}
