//! # cdm-schema — Schema Resolution & Validation
//!
//! Resolves interface URIs to JSON Schema documents and validates
//! JSON-able structures against them.
//!
//! ## Sources (`source`, `remote`)
//!
//! A [`SchemaSource`] maps an interface URI to a document. The bundled
//! documents ([`EmbeddedSchemas`]) cover every interface the message
//! catalog emits. A [`DirectorySource`] mirrors a local directory, and with
//! the `remote` feature `HttpSource` fetches from the schema host or a
//! mirror. [`LayeredSource`] stacks them.
//!
//! ## Validation (`resolver`, `strict`, `semantic`)
//!
//! [`SchemaResolver::validate_structure`] checks an instance in one of two
//! tiers: the schema as published, or its strict variant with unknown keys
//! forbidden. [`SchemaResolver::validate_semantics`] applies cross-field
//! rules for the allow-listed namespaces.
//!
//! ## Crate Policy
//!
//! - Depends only on `cdm-core` internally.
//! - Every failure is reported. Whether a failure is fatal is decided by
//!   the codec from the effective strictness, never here.

pub mod error;
#[cfg(feature = "remote")]
pub mod remote;
pub mod resolver;
pub mod semantic;
pub mod source;
pub mod strict;

pub use error::{SchemaError, SchemaTier, SemanticValidationError, ValidationDetail, ValidationError};
#[cfg(feature = "remote")]
pub use remote::HttpSource;
pub use resolver::{SchemaDocument, SchemaResolver};
pub use semantic::{SemanticRule, SemanticRuleSet};
pub use source::{DirectorySource, EmbeddedSchemas, LayeredSource, SchemaSource};
pub use strict::strict_variant;
