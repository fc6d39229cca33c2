//! # Codec
//!
//! The single entry point for turning messages into JSON text and back.
//!
//! ## Serialize flow
//!
//! 1. Look up the converter registered for the exact message type.
//! 2. Check the object-model invariants ([`Validate`](cdm_core::Validate)).
//! 3. Serialize with serde, then run the converter's after-serialize steps
//!    (null stripping, layout renames, exclusivity).
//! 4. Validate the structure against the schema named by its `interface`.
//! 5. Render the text.
//!
//! ## Parse flow
//!
//! 1. Parse the text; malformed JSON is [`CodecError::MessageParse`].
//! 2. Validate the raw structure against its schema.
//! 3. Run the before-parse steps, deserialize, check invariants.
//!
//! A failing document never yields a message.
//!
//! ## Validation
//!
//! Structures without an `interface` are not validated. Otherwise the basic
//! tier runs first, the strict tier only when the basic tier passes, then
//! the semantic rules. Each failure is classed and gated by the effective
//! [`Strictness`]: raised, logged at warn, or logged at debug.

use std::path::Path;
use std::sync::Arc;

use cdm_core::convert::transform::interface_of;
use cdm_core::{FailureClass, FieldValidationError, Message, Reaction, Strictness, StrictnessPolicy};
use cdm_schema::{SchemaError, SchemaResolver, SchemaTier};
use serde_json::Value;

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::registry::{Converter, ConverterRegistry};

/// Per-call validation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// Whether schema validation runs at all.
    pub enabled: bool,
    /// Level for this call; `None` uses the codec's default.
    pub strictness: Option<Strictness>,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            enabled: true,
            strictness: None,
        }
    }
}

impl Validation {
    /// Skip schema validation. Object-model invariants are still checked.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            strictness: None,
        }
    }

    /// Validate at `strictness` unless the environment overrides it.
    pub fn with_strictness(strictness: Strictness) -> Self {
        Self {
            enabled: true,
            strictness: Some(strictness),
        }
    }
}

/// Marshals registered message types to and from JSON text.
///
/// Cheap to clone; clones share the converter registry and the resolver
/// caches.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<ConverterRegistry>,
    resolver: Arc<SchemaResolver>,
    policy: StrictnessPolicy,
}

impl Codec {
    /// Build a codec from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Registry`] if the standard converters conflict
    /// and [`CodecError::Schema`] if a configured schema source cannot be
    /// opened.
    pub fn new(config: &CodecConfig) -> Result<Self, CodecError> {
        let registry = ConverterRegistry::standard()?;
        let source = config.schema_source().map_err(CodecError::Schema)?;
        tracing::debug!(
            layers = ?source.layer_names(),
            policy = ?config.policy(),
            "codec configured"
        );
        Ok(Self::with_parts(
            registry,
            Arc::new(SchemaResolver::new(source)),
            config.policy(),
        ))
    }

    /// Build a codec from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] for an invalid variable, otherwise as
    /// [`Codec::new`].
    pub fn from_env() -> Result<Self, CodecError> {
        Self::new(&CodecConfig::from_env()?)
    }

    /// A codec over the bundled schemas with default settings.
    ///
    /// `VALIDATION_STRICTNESS` and the schema variables are not read, so
    /// operators cannot force this codec strict. Use [`Codec::from_env`]
    /// outside tests and tools that pin their own level.
    ///
    /// # Errors
    ///
    /// As [`Codec::new`].
    pub fn embedded_ignoring_env() -> Result<Self, CodecError> {
        Self::new(&CodecConfig::default())
    }

    /// Assemble a codec from parts.
    pub fn with_parts(registry: Arc<ConverterRegistry>, resolver: Arc<SchemaResolver>, policy: StrictnessPolicy) -> Self {
        Self {
            registry,
            resolver,
            policy,
        }
    }

    /// The converter registry in use.
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// The schema resolver in use.
    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// The strictness policy in use.
    pub fn policy(&self) -> StrictnessPolicy {
        self.policy
    }

    fn converter<M: Message>(&self) -> Result<&Converter, CodecError> {
        self.registry.lookup::<M>().ok_or(CodecError::ConverterNotFound {
            kind: M::KIND,
            type_name: std::any::type_name::<M>(),
        })
    }

    // -- Serialize ----------------------------------------------------------

    /// Serialize `message` to JSON text with default validation.
    ///
    /// # Errors
    ///
    /// See [`Codec::dumps_with`].
    pub fn dumps<M: Message>(&self, message: &M) -> Result<String, CodecError> {
        self.dumps_with(message, Validation::default())
    }

    /// Serialize `message` to JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ConverterNotFound`] for an unregistered type,
    /// [`CodecError::FieldValidation`] for a broken invariant, and any
    /// validation failure the effective strictness raises.
    pub fn dumps_with<M: Message>(&self, message: &M, validation: Validation) -> Result<String, CodecError> {
        let value = self.to_value(message, validation)?;
        serde_json::to_string(&value).map_err(CodecError::Serialize)
    }

    /// Convert `message` to its validated JSON-able structure.
    ///
    /// # Errors
    ///
    /// As [`Codec::dumps_with`].
    pub fn to_value<M: Message>(&self, message: &M, validation: Validation) -> Result<Value, CodecError> {
        let converter = self.converter::<M>()?;
        message.validate()?;

        let mut value = serde_json::to_value(message).map_err(CodecError::Serialize)?;
        converter.finish_serialize(&mut value)?;

        self.validate_value(&value, validation)?;
        Ok(value)
    }

    // -- Parse --------------------------------------------------------------

    /// Parse JSON text into an `M` with default validation.
    ///
    /// # Errors
    ///
    /// See [`Codec::loads_with`].
    pub fn loads<M: Message>(&self, json_text: &str) -> Result<M, CodecError> {
        self.loads_with(json_text, Validation::default())
    }

    /// Parse JSON text into an `M`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MessageParse`] for malformed JSON,
    /// [`CodecError::ConverterNotFound`] for an unregistered type,
    /// [`CodecError::FieldValidation`] when the structure does not map onto
    /// `M` or breaks an invariant, and any validation failure the effective
    /// strictness raises.
    pub fn loads_with<M: Message>(&self, json_text: &str, validation: Validation) -> Result<M, CodecError> {
        let value: Value = serde_json::from_str(json_text).map_err(CodecError::MessageParse)?;
        self.from_value(value, validation)
    }

    /// Build an `M` from a JSON-able structure.
    ///
    /// # Errors
    ///
    /// As [`Codec::loads_with`], except for text parsing.
    pub fn from_value<M: Message>(&self, mut value: Value, validation: Validation) -> Result<M, CodecError> {
        let converter = self.converter::<M>()?;
        self.validate_value(&value, validation)?;

        converter.prepare_parse(&mut value)?;
        let message: M = serde_json::from_value(value).map_err(|e| FieldValidationError::Malformed {
            message_type: M::KIND.name(),
            reason: e.to_string(),
        })?;
        message.validate()?;
        Ok(message)
    }

    /// Read a JSON file and parse it into an `M` with default validation.
    ///
    /// # Errors
    ///
    /// See [`Codec::load_from_file_with`].
    pub fn load_from_file<M: Message>(&self, path: impl AsRef<Path>) -> Result<M, CodecError> {
        self.load_from_file_with(path, Validation::default())
    }

    /// Read a JSON file and parse it into an `M`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Io`] if the file cannot be read as UTF-8 text,
    /// otherwise as [`Codec::loads_with`].
    pub fn load_from_file_with<M: Message>(&self, path: impl AsRef<Path>, validation: Validation) -> Result<M, CodecError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.loads_with(&text, validation)
    }

    // -- Validation ---------------------------------------------------------

    /// Validate a JSON-able structure against the schema and semantic rules
    /// named by its `interface`, gated by the effective strictness.
    ///
    /// # Errors
    ///
    /// Returns the failures the effective strictness raises, and schema
    /// load or compile errors unconditionally.
    pub fn validate_value(&self, value: &Value, validation: Validation) -> Result<(), CodecError> {
        let strictness = self.policy.resolve(validation.strictness);
        if !validation.enabled || !strictness.validates() {
            return Ok(());
        }
        let Some(uri) = interface_of(value) else {
            tracing::debug!("structure declares no interface, skipping validation");
            return Ok(());
        };

        match self.resolver.validate_structure(uri, value, SchemaTier::Basic) {
            Ok(()) => match self.resolver.validate_structure(uri, value, SchemaTier::Strict) {
                Ok(()) => {}
                Err(SchemaError::Invalid(invalid)) => {
                    react(strictness, FailureClass::StrictStructural, CodecError::Validation(invalid))?;
                }
                Err(other) => return Err(other.into()),
            },
            Err(SchemaError::Invalid(invalid)) => {
                react(strictness, FailureClass::BasicStructural, CodecError::Validation(invalid))?;
            }
            Err(SchemaError::NotFound(missing)) => {
                react(strictness, FailureClass::SchemaNotFound, CodecError::SchemaNotFound(missing))?;
            }
            Err(fetch @ SchemaError::Fetch { .. }) => {
                react(strictness, FailureClass::SchemaNotFound, CodecError::Schema(fetch))?;
            }
            Err(other) => return Err(other.into()),
        }

        if let Err(semantic) = self.resolver.validate_semantics(value, uri) {
            react(strictness, FailureClass::Semantic, semantic.into())?;
        }
        Ok(())
    }
}

fn react(strictness: Strictness, class: FailureClass, err: CodecError) -> Result<(), CodecError> {
    match strictness.reaction(class) {
        Reaction::Raise => Err(err),
        Reaction::Warn => {
            tracing::warn!(%strictness, failure = ?class, error = %err, "validation failure tolerated");
            Ok(())
        }
        Reaction::Ignore => {
            tracing::debug!(%strictness, failure = ?class, error = %err, "validation failure ignored");
            Ok(())
        }
    }
}
