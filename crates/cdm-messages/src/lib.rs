#![deny(missing_docs)]

//! # cdm-messages — Telescope Control Messages
//!
//! The object model exchanged between control-system components: resource
//! allocation and release, scan configuration and scan requests, for both
//! the Mid (dish) and Low (station) telescopes.
//!
//! Field names follow the current JSON layout. Legacy key names and
//! version-dependent restructuring are applied by the converters in
//! `cdm-codec`, not here; the serde implementations on these types are the
//! structural half of each converter.
//!
//! ## Construction
//!
//! Types whose invariants span fields (ranges, mutual exclusivity,
//! required combinations) have validating constructors returning
//! `Result<_, FieldValidationError>`. Every type also implements
//! [`Validate`](cdm_core::Validate), which the codec runs on every
//! serialize and parse so a hand-built or deserialized value cannot bypass
//! the checks.

pub mod common;
pub mod csp;
pub mod low;
pub mod mid;
pub mod sdp;

pub use common::{check_subarray_id, DishAllocation, ReceiverBand, TmcConfiguration};
pub use csp::{
    CbfConfiguration, CommonConfiguration, CorrelationConfiguration, CspConfiguration, FspConfiguration,
    FspFunctionMode, MidCbfConfiguration, ProcessingRegion, SubarrayConfiguration,
};
pub use low::{
    LowAssignResourcesRequest, LowCbfConfiguration, LowCommonConfiguration, LowConfigureRequest,
    LowCspConfiguration, MccsAllocation, MccsConfiguration, StationBeamConfiguration, StationConfiguration,
    SubarrayBeamAperture, SubarrayBeamConfiguration, SubarrayBeamLogicalBand, SubarrayBeamTarget,
    VisConfiguration, VisFspConfiguration, VisStationBeam,
};
pub use mid::{
    AltAzTarget, AssignResourcesRequest, ConfigureRequest, DishConfiguration, IcrsTarget, PointingConfiguration,
    PointingCorrection, ReleaseResourcesRequest, ScanRequest, SpecialTarget, Target,
};
pub use sdp::{
    ExecutionBlockConfiguration, PbDependency, ProcessingBlockConfiguration, ResourceConfiguration, ScanType,
    ScriptConfiguration, ScriptKind, SdpConfiguration, SdpScanConfiguration,
};
