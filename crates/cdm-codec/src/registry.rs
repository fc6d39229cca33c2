//! # Converter Registry
//!
//! Maps each [`MessageKind`] to the [`Converter`] that marshals it. The
//! registry is built once by a [`RegistryBuilder`] in a fixed order and is
//! read-only afterwards, so it can be shared between threads behind an
//! `Arc` without locking.
//!
//! A converter is the type's serde implementation plus two ordered lists
//! of structure transforms: one run after serializing, one run before
//! parsing. Object-model checks after parsing are the type's
//! [`Validate`](cdm_core::Validate) implementation.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use cdm_core::convert::transform::Transform;
use cdm_core::{FieldValidationError, Message, MessageKind};
use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

/// Registry construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A second converter was registered for the same kind.
    #[error("a converter for {kind} is already registered ({existing})")]
    DuplicateConverter {
        /// The contested kind.
        kind: MessageKind,
        /// Type name of the converter already registered.
        existing: &'static str,
    },
}

/// The marshalling pipeline of one message type.
#[derive(Clone)]
pub struct Converter {
    kind: MessageKind,
    type_id: TypeId,
    type_name: &'static str,
    after_serialize: Vec<Transform>,
    before_parse: Vec<Transform>,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .field("after_serialize", &self.after_serialize.len())
            .field("before_parse", &self.before_parse.len())
            .finish()
    }
}

impl Converter {
    /// A converter for `M` with empty pipelines.
    pub fn of<M: Message>() -> Self {
        Self {
            kind: M::KIND,
            type_id: TypeId::of::<M>(),
            type_name: std::any::type_name::<M>(),
            after_serialize: Vec::new(),
            before_parse: Vec::new(),
        }
    }

    /// Append a step to the after-serialize pipeline.
    pub fn after_serialize(mut self, step: Transform) -> Self {
        self.after_serialize.push(step);
        self
    }

    /// Append a step to the before-parse pipeline.
    pub fn before_parse(mut self, step: Transform) -> Self {
        self.before_parse.push(step);
        self
    }

    /// The kind this converter is registered under.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// The Rust type this converter marshals.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this converter marshals exactly `M`.
    pub fn handles<M: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<M>()
    }

    /// Run the after-serialize steps in order.
    ///
    /// # Errors
    ///
    /// Returns the first step's [`FieldValidationError`].
    pub fn finish_serialize(&self, value: &mut Value) -> Result<(), FieldValidationError> {
        self.after_serialize.iter().try_for_each(|step| step(value))
    }

    /// Run the before-parse steps in order.
    ///
    /// # Errors
    ///
    /// Returns the first step's [`FieldValidationError`].
    pub fn prepare_parse(&self, value: &mut Value) -> Result<(), FieldValidationError> {
        self.before_parse.iter().try_for_each(|step| step(value))
    }
}

/// Collects converters, rejecting duplicates.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    converters: HashMap<MessageKind, Converter>,
    order: Vec<MessageKind>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `converter` under its kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateConverter`] if the kind is taken.
    pub fn register(mut self, converter: Converter) -> Result<Self, RegistryError> {
        if let Some(existing) = self.converters.get(&converter.kind) {
            return Err(RegistryError::DuplicateConverter {
                kind: converter.kind,
                existing: existing.type_name,
            });
        }
        self.order.push(converter.kind);
        self.converters.insert(converter.kind, converter);
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ConverterRegistry {
        ConverterRegistry {
            converters: self.converters,
            order: self.order,
        }
    }
}

/// Read-only lookup from message kind to converter.
#[derive(Debug)]
pub struct ConverterRegistry {
    converters: HashMap<MessageKind, Converter>,
    order: Vec<MessageKind>,
}

static STANDARD: Lazy<Result<Arc<ConverterRegistry>, RegistryError>> =
    Lazy::new(|| crate::converters::register_all(RegistryBuilder::new()).map(|b| Arc::new(b.build())));

impl ConverterRegistry {
    /// The process-wide registry holding every built-in converter.
    ///
    /// Built on first use; later calls share the same instance.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the built-in registrations conflict.
    pub fn standard() -> Result<Arc<ConverterRegistry>, RegistryError> {
        (*STANDARD).clone()
    }

    /// The converter for exactly `M`, if registered.
    pub fn lookup<M: Message>(&self) -> Option<&Converter> {
        self.converters.get(&M::KIND).filter(|c| c.handles::<M>())
    }

    /// The converter registered under `kind`.
    pub fn get(&self, kind: MessageKind) -> Option<&Converter> {
        self.converters.get(&kind)
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> &[MessageKind] {
        &self.order
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
