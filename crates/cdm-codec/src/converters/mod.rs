//! # Built-in Converters
//!
//! One registration per message kind. Every converter starts from
//! [`base`], which drops top-level `null` members after serializing, then
//! adds the layout and exclusivity steps its type needs.
//!
//! Layouts are chosen from the message's own interface URI: messages
//! without one, or with a major version below 2, use the legacy key names
//! (`subarrayID`, `receptorIDList`, `releaseALL`, `scanDuration`). Parsing
//! accepts either layout regardless of the declared interface.

pub mod csp;
pub mod low;
pub mod mid;
pub mod sdp;

use cdm_core::convert::transform::strip_nulls;
use cdm_core::Message;

use crate::registry::{Converter, RegistryBuilder, RegistryError};

/// The starting pipeline shared by every converter.
pub fn base<M: Message>() -> Converter {
    Converter::of::<M>().after_serialize(strip_nulls)
}

/// Register every built-in converter, in [`MessageKind::ALL`] order.
///
/// [`MessageKind::ALL`]: cdm_core::MessageKind::ALL
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateConverter`] if `builder` already holds
/// one of the built-in kinds.
pub fn register_all(builder: RegistryBuilder) -> Result<RegistryBuilder, RegistryError> {
    builder
        .register(mid::assign_resources())?
        .register(mid::release_resources())?
        .register(mid::configure())?
        .register(mid::scan())?
        .register(csp::csp_configuration())?
        .register(sdp::sdp_configuration())?
        .register(low::assign_resources())?
        .register(low::configure())?
        .register(low::csp_configuration())
}
