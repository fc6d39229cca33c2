//! Low telescope requests.

pub mod assign;
pub mod configure;
pub mod csp;

pub use assign::{LowAssignResourcesRequest, MccsAllocation};
pub use configure::{
    LowConfigureRequest, MccsConfiguration, SubarrayBeamAperture, SubarrayBeamConfiguration, SubarrayBeamLogicalBand,
    SubarrayBeamTarget,
};
pub use csp::{
    LowCbfConfiguration, LowCommonConfiguration, LowCspConfiguration, StationBeamConfiguration, StationConfiguration,
    VisConfiguration, VisFspConfiguration, VisStationBeam,
};

/// Lowest valid subarray beam number.
pub const MIN_SUBARRAY_BEAM_ID: u8 = 1;

/// Highest valid subarray beam number.
pub const MAX_SUBARRAY_BEAM_ID: u8 = 48;
