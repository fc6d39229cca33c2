//! Mid telescope requests.

pub mod assign;
pub mod configure;
pub mod release;
pub mod scan;

pub use assign::AssignResourcesRequest;
pub use configure::{
    AltAzTarget, ConfigureRequest, DishConfiguration, IcrsTarget, PointingConfiguration, PointingCorrection,
    SpecialTarget, Target,
};
pub use release::ReleaseResourcesRequest;
pub use scan::ScanRequest;
