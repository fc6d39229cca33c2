//! # Schema Resolver
//!
//! Resolves interface URIs to schema documents and runs the two validation
//! passes: structural (JSON Schema draft 2020-12, in a basic and a strict
//! tier) and semantic (the [`SemanticRuleSet`]).
//!
//! Documents and compiled validators are cached per URI and per
//! (URI, tier). The first validation against a URI pays for the fetch and
//! the compile; later ones are a map lookup under a read lock.
//!
//! Cross-document `$ref`s (for example a TMC configure schema embedding the
//! CSP configure schema) are resolved through the same [`SchemaSource`], in
//! the same tier as the referring document.

use std::collections::HashMap;
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{SchemaError, SchemaTier, SemanticValidationError, ValidationDetail, ValidationError};
use crate::semantic::SemanticRuleSet;
use crate::source::{EmbeddedSchemas, SchemaSource};
use crate::strict::strict_variant;

/// A resolved schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// The interface URI the document was resolved for.
    pub uri: String,
    /// The document as published.
    pub schema: Value,
}

impl SchemaDocument {
    /// The document title, if it declares one.
    pub fn title(&self) -> Option<&str> {
        self.schema.get("title").and_then(Value::as_str)
    }
}

/// Resolves `$ref` targets through a [`SchemaSource`] instead of the network.
struct SourceRetriever {
    source: Arc<dyn SchemaSource>,
    tier: SchemaTier,
}

impl Retrieve for SourceRetriever {
    fn retrieve(&self, uri: &Uri<&str>) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri = uri.as_str();
        let schema = self
            .source
            .fetch(uri)?
            .ok_or_else(|| SchemaError::NotFound(uri.to_string()))?;
        Ok(match self.tier {
            SchemaTier::Basic => schema,
            SchemaTier::Strict => strict_variant(&schema),
        })
    }
}

/// Interface URI lookup plus structural and semantic validation.
pub struct SchemaResolver {
    source: Arc<dyn SchemaSource>,
    rules: SemanticRuleSet,
    documents: RwLock<HashMap<String, Arc<SchemaDocument>>>,
    validators: RwLock<HashMap<(String, SchemaTier), Arc<Validator>>>,
}

impl std::fmt::Debug for SchemaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaResolver")
            .field("source", &self.source.name())
            .field("cached_documents", &self.documents.read().len())
            .field("cached_validators", &self.validators.read().len())
            .field("semantic_namespaces", &self.rules.namespaces().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaResolver {
    /// A resolver over `source` with the standard semantic rules.
    pub fn new(source: impl SchemaSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// A resolver over an already shared source.
    pub fn from_shared(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            rules: SemanticRuleSet::standard(),
            documents: RwLock::new(HashMap::new()),
            validators: RwLock::new(HashMap::new()),
        }
    }

    /// A resolver over the bundled schema documents only.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSchemas)
    }

    /// Replace the semantic rule set.
    pub fn with_rules(mut self, rules: SemanticRuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// The semantic rule set in use.
    pub fn rules(&self) -> &SemanticRuleSet {
        &self.rules
    }

    /// Look up the schema document for `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] if no source knows the URI, or the
    /// source's own error if the document cannot be obtained.
    pub fn get_schema_by_uri(&self, uri: &str) -> Result<Arc<SchemaDocument>, SchemaError> {
        if let Some(doc) = self.documents.read().get(uri) {
            return Ok(Arc::clone(doc));
        }

        let schema = self
            .source
            .fetch(uri)?
            .ok_or_else(|| SchemaError::NotFound(uri.to_string()))?;
        let doc = Arc::new(SchemaDocument {
            uri: uri.to_string(),
            schema,
        });
        tracing::debug!(uri, source = self.source.name(), "cached schema document");

        let mut documents = self.documents.write();
        Ok(Arc::clone(documents.entry(uri.to_string()).or_insert(doc)))
    }

    /// The compiled validator for `uri` in `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] for an unknown URI and
    /// [`SchemaError::Compile`] if the document (or a document it
    /// references) is not a usable schema.
    pub fn validator(&self, uri: &str, tier: SchemaTier) -> Result<Arc<Validator>, SchemaError> {
        let key = (uri.to_string(), tier);
        if let Some(validator) = self.validators.read().get(&key) {
            return Ok(Arc::clone(validator));
        }

        let doc = self.get_schema_by_uri(uri)?;
        let schema = match tier {
            SchemaTier::Basic => doc.schema.clone(),
            SchemaTier::Strict => strict_variant(&doc.schema),
        };

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(SourceRetriever {
            source: Arc::clone(&self.source),
            tier,
        });
        let validator = opts.build(&schema).map_err(|e| SchemaError::Compile {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        let mut validators = self.validators.write();
        Ok(Arc::clone(
            validators.entry(key).or_insert_with(|| Arc::new(validator)),
        ))
    }

    /// Check `instance` against the `tier` schema for `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] with every violation when the
    /// instance does not conform, and the lookup or compile error when the
    /// schema itself is unavailable.
    pub fn validate_structure(&self, uri: &str, instance: &Value, tier: SchemaTier) -> Result<(), SchemaError> {
        let validator = self.validator(uri, tier)?;

        let details: Vec<ValidationDetail> = validator
            .iter_errors(instance)
            .map(|e| ValidationDetail {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid(ValidationError {
                uri: uri.to_string(),
                tier,
                instance: instance.clone(),
                details,
            }))
        }
    }

    /// Whether semantic rules exist for `uri`.
    pub fn has_semantic_rules(&self, uri: &str) -> bool {
        self.rules.covers(uri)
    }

    /// Apply the semantic rules for `uri` to `instance`.
    ///
    /// URIs outside the allow-listed namespaces pass without any check.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticValidationError`] naming every violated rule.
    pub fn validate_semantics(&self, instance: &Value, uri: &str) -> Result<(), SemanticValidationError> {
        if !self.rules.covers(uri) {
            return Ok(());
        }
        self.rules.validate(uri, instance)
    }

    /// Number of cached documents.
    pub fn cached_documents(&self) -> usize {
        self.documents.read().len()
    }
}
