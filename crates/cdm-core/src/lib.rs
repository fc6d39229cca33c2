#![deny(missing_docs)]

//! # cdm-core — Foundational Types for the Configuration Data Model
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Object-model errors are their own type.** [`FieldValidationError`]
//!    is raised by converters and constructors; schema failures are never
//!    expressed with it.
//!
//! 2. **A closed set of message kinds.** [`MessageKind`] is the key of the
//!    converter registry. Dispatch is by explicit kind, not by reflection.
//!
//! 3. **Strictness is data.** [`Strictness::reaction`] is the single gating
//!    table deciding whether a validation failure raises, warns or is
//!    ignored.

pub mod convert;
pub mod error;
pub mod interface;
pub mod message;
pub mod strictness;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{check_max_len, check_range, FieldValidationError, InterfaceError};
pub use interface::{InterfaceUri, SCHEMA_URI_PREFIX};
pub use message::{Message, MessageKind, Validate};
pub use strictness::{FailureClass, ParseStrictnessError, Reaction, Strictness, StrictnessPolicy};
