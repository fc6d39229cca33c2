//! Low request converters.
//!
//! The Low interfaces were published after the key layout settled, so no
//! renaming is needed beyond the shared null stripping.

use cdm_messages::{LowAssignResourcesRequest, LowConfigureRequest, LowCspConfiguration};

use super::base;
use crate::registry::Converter;

/// Converter for [`LowAssignResourcesRequest`].
pub fn assign_resources() -> Converter {
    base::<LowAssignResourcesRequest>()
}

/// Converter for [`LowConfigureRequest`].
pub fn configure() -> Converter {
    base::<LowConfigureRequest>()
}

/// Converter for [`LowCspConfiguration`].
pub fn csp_configuration() -> Converter {
    base::<LowCspConfiguration>()
}
