//! SDP resource allocation converter.

use cdm_messages::SdpConfiguration;

use super::base;
use crate::registry::Converter;

/// Converter for [`SdpConfiguration`].
pub fn sdp_configuration() -> Converter {
    base::<SdpConfiguration>()
}
