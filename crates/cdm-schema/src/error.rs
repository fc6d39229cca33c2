//! # Schema Errors
//!
//! Errors raised by schema sources and the resolver. The resolver reports
//! every failure; deciding whether a failure is fatal is left to the codec.

use serde_json::Value;
use thiserror::Error;

/// Which structural tier a document was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaTier {
    /// The schema as published.
    Basic,
    /// The schema with unknown object keys forbidden.
    Strict,
}

impl std::fmt::Display for SchemaTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Basic => "basic",
            Self::Strict => "strict",
        })
    }
}

/// One structural violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDetail {
    /// JSON Pointer to the offending value in the instance.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            &self.instance_path
        };
        write!(f, "{path}: {}", self.message)
    }
}

/// An instance does not conform to the schema of its interface URI.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} {tier} schema violation(s) against {uri}: {}", .details.len(), summary(.details))]
pub struct ValidationError {
    /// The interface URI whose schema was violated.
    pub uri: String,
    /// The tier that failed.
    pub tier: SchemaTier,
    /// The offending instance.
    pub instance: Value,
    /// Every violation, in the order the validator reported them.
    pub details: Vec<ValidationDetail>,
}

fn summary(details: &[ValidationDetail]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Cross-field business rules were violated.
///
/// The message is every violated rule description, comma-joined in rule
/// evaluation order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SemanticValidationError {
    /// The interface URI whose rules were applied.
    pub uri: String,
    /// The violated rule descriptions, in evaluation order.
    pub violations: Vec<String>,
    /// The comma-joined descriptions.
    pub message: String,
}

impl SemanticValidationError {
    /// Build from the violated rule descriptions.
    pub fn new(uri: impl Into<String>, violations: Vec<String>) -> Self {
        let message = violations.join(", ");
        Self {
            uri: uri.into(),
            violations,
            message,
        }
    }
}

/// Errors returned by schema sources and the resolver.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The interface URI does not resolve to any known schema.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// A schema document could not be read or parsed.
    #[error("failed to load schema {uri}: {reason}")]
    Load {
        /// URI or path of the document.
        uri: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A remote schema document could not be fetched.
    #[error("failed to fetch schema {uri}: {reason}")]
    Fetch {
        /// URI of the document.
        uri: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A schema document could not be compiled into a validator.
    #[error("failed to compile schema {uri}: {reason}")]
    Compile {
        /// URI of the document.
        uri: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The instance failed structural validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// I/O error while scanning a schema directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
