//! # Codec Errors
//!
//! One variant per failure kind a caller may want to handle differently.
//! Object-model rejections ([`CodecError::FieldValidation`]) are kept apart
//! from schema rejections ([`CodecError::Validation`],
//! [`CodecError::SemanticValidation`]).

use std::path::PathBuf;

use cdm_core::{FieldValidationError, MessageKind};
use cdm_schema::{SchemaError, SemanticValidationError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::registry::RegistryError;

/// Errors returned by [`Codec`](crate::Codec) operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// No converter is registered for the exact type requested.
    #[error("no converter registered for {type_name} ({kind})")]
    ConverterNotFound {
        /// The kind the type claims.
        kind: MessageKind,
        /// The Rust type that was requested.
        type_name: &'static str,
    },

    /// The input text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    MessageParse(#[source] serde_json::Error),

    /// A value broke an object-model invariant.
    #[error(transparent)]
    FieldValidation(#[from] FieldValidationError),

    /// The interface URI does not resolve to a known schema.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The structure does not conform to its schema.
    #[error(transparent)]
    Validation(ValidationError),

    /// The structure breaks cross-field business rules.
    #[error(transparent)]
    SemanticValidation(#[from] SemanticValidationError),

    /// A schema document could not be fetched, loaded or compiled.
    #[error(transparent)]
    Schema(SchemaError),

    /// The message could not be turned into a JSON-able structure.
    #[error("cannot serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file requested.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The converter registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::NotFound(uri) => Self::SchemaNotFound(uri),
            SchemaError::Invalid(invalid) => Self::Validation(invalid),
            other => Self::Schema(other),
        }
    }
}

impl CodecError {
    /// Whether the error came from schema or semantic validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::SemanticValidation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_schema::SchemaTier;
    use serde_json::json;

    #[test]
    fn schema_errors_map_to_their_kind() {
        let uri = "https://schema.skao.int/ska-tmc-scan/9.9".to_string();
        assert!(matches!(
            CodecError::from(SchemaError::NotFound(uri.clone())),
            CodecError::SchemaNotFound(u) if u == uri
        ));

        let invalid = ValidationError {
            uri: uri.clone(),
            tier: SchemaTier::Strict,
            instance: json!({}),
            details: vec![],
        };
        let err = CodecError::from(SchemaError::Invalid(invalid));
        assert!(err.is_validation());

        let compile = SchemaError::Compile {
            uri,
            reason: "bad".to_string(),
        };
        assert!(matches!(CodecError::from(compile), CodecError::Schema(_)));
    }

    #[test]
    fn field_errors_stay_distinct() {
        let err = CodecError::from(FieldValidationError::MissingField {
            message_type: "ReleaseResourcesRequest",
            field: "dish",
        });
        assert!(!err.is_validation());
        assert!(matches!(err, CodecError::FieldValidation(_)));
    }
}
