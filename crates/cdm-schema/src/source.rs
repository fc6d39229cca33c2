//! # Schema Sources
//!
//! Where schema documents come from. A [`SchemaSource`] maps an interface
//! URI to a parsed JSON-Schema document, or reports that it does not know
//! the URI. Sources are layered with [`LayeredSource`]: a local mirror
//! directory in front of the bundled documents, optionally followed by a
//! remote fetch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SchemaError;

/// A provider of schema documents keyed by interface URI.
pub trait SchemaSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the document for `uri`.
    ///
    /// Returns `Ok(None)` when this source does not know the URI.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] or [`SchemaError::Fetch`] when the
    /// document exists but cannot be obtained.
    fn fetch(&self, uri: &str) -> Result<Option<Value>, SchemaError>;
}

// ---------------------------------------------------------------------------
// Bundled documents
// ---------------------------------------------------------------------------

macro_rules! bundled {
    ($($uri:literal => $file:literal),* $(,)?) => {
        &[$(($uri, include_str!(concat!("../schemas/", $file)))),*]
    };
}

/// Schema documents compiled into the crate.
const BUNDLED: &[(&str, &str)] = bundled! {
    "https://schema.skao.int/ska-tmc-assignresources/2.1" => "ska-tmc-assignresources-2.1.json",
    "https://schema.skao.int/ska-tmc-releaseresources/2.1" => "ska-tmc-releaseresources-2.1.json",
    "https://schema.skao.int/ska-tmc-configure/2.3" => "ska-tmc-configure-2.3.json",
    "https://schema.skao.int/ska-tmc-configure/4.0" => "ska-tmc-configure-4.0.json",
    "https://schema.skao.int/ska-tmc-scan/2.1" => "ska-tmc-scan-2.1.json",
    "https://schema.skao.int/ska-csp-configure/1.0" => "ska-csp-configure-1.0.json",
    "https://schema.skao.int/ska-csp-configure/2.0" => "ska-csp-configure-2.0.json",
    "https://schema.skao.int/ska-csp-configure/4.0" => "ska-csp-configure-4.0.json",
    "https://schema.skao.int/ska-sdp-assignres/0.4" => "ska-sdp-assignres-0.4.json",
    "https://schema.skao.int/ska-low-tmc-assignresources/4.0" => "ska-low-tmc-assignresources-4.0.json",
    "https://schema.skao.int/ska-low-tmc-configure/4.0" => "ska-low-tmc-configure-4.0.json",
    "https://schema.skao.int/ska-low-csp-configure/3.2" => "ska-low-csp-configure-3.2.json",
};

/// The schema documents bundled with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSchemas;

impl EmbeddedSchemas {
    /// Every bundled interface URI.
    pub fn uris() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(uri, _)| *uri)
    }
}

impl SchemaSource for EmbeddedSchemas {
    fn name(&self) -> &str {
        "embedded"
    }

    fn fetch(&self, uri: &str) -> Result<Option<Value>, SchemaError> {
        let Some((_, text)) = BUNDLED.iter().find(|(known, _)| *known == uri) else {
            return Ok(None);
        };
        serde_json::from_str(text)
            .map(Some)
            .map_err(|e| SchemaError::Load {
                uri: uri.to_string(),
                reason: e.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Directory mirror
// ---------------------------------------------------------------------------

/// Schema documents loaded from a local directory.
///
/// Every `*.json` file under the directory (recursively) is parsed at
/// construction time and registered under its `$id`. Files without a string
/// `$id` are skipped, since no interface URI can be derived for them.
pub struct DirectorySource {
    dir: PathBuf,
    schemas: HashMap<String, Value>,
}

impl std::fmt::Debug for DirectorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorySource")
            .field("dir", &self.dir)
            .field("schema_count", &self.schemas.len())
            .finish()
    }
}

impl DirectorySource {
    /// Load every schema document under `dir`.
    ///
    /// A directory that does not exist yields an empty source.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] if a file cannot be read or is not
    /// valid JSON.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let dir = dir.into();
        let mut schemas = HashMap::new();

        if !dir.is_dir() {
            return Ok(Self { dir, schemas });
        }

        let mut paths = Vec::new();
        collect_json_files(&dir, &mut paths)?;
        paths.sort();

        for path in paths {
            let load_error = |reason: String| SchemaError::Load {
                uri: path.display().to_string(),
                reason,
            };
            let content = std::fs::read_to_string(&path).map_err(|e| load_error(e.to_string()))?;
            let schema: Value =
                serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

            match schema.get("$id").and_then(Value::as_str) {
                Some(id) => {
                    schemas.insert(id.to_string(), schema);
                }
                None => {
                    tracing::warn!(path = %path.display(), "schema file has no $id, skipping");
                }
            }
        }

        Ok(Self { dir, schemas })
    }

    /// Number of documents loaded.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// The mirrored directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SchemaSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    fn fetch(&self, uri: &str) -> Result<Option<Value>, SchemaError> {
        Ok(self.schemas.get(uri).cloned())
    }
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SchemaError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Layering
// ---------------------------------------------------------------------------

/// Sources consulted in order; the first that knows a URI wins.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn SchemaSource>>,
}

impl LayeredSource {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer behind the existing ones.
    pub fn push(mut self, source: impl SchemaSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Names of the layers, in lookup order.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

impl SchemaSource for LayeredSource {
    fn name(&self) -> &str {
        "layered"
    }

    fn fetch(&self, uri: &str) -> Result<Option<Value>, SchemaError> {
        for layer in &self.layers {
            if let Some(doc) = layer.fetch(uri)? {
                tracing::debug!(source = layer.name(), uri, "resolved schema document");
                return Ok(Some(doc));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_documents_parse_and_match_their_ids() {
        for uri in EmbeddedSchemas::uris() {
            let doc = EmbeddedSchemas
                .fetch(uri)
                .unwrap()
                .unwrap_or_else(|| panic!("{uri} not bundled"));
            assert_eq!(doc.get("$id").and_then(Value::as_str), Some(uri));
        }
    }

    #[test]
    fn embedded_unknown_uri_is_none() {
        assert!(EmbeddedSchemas
            .fetch("https://schema.skao.int/ska-tmc-configure/9.9")
            .unwrap()
            .is_none());
    }

    #[test]
    fn directory_source_keys_by_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested").join("scan.json"),
            r#"{"$id": "https://schema.example.org/ska-tmc-scan/9.0", "type": "object"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("anon.json"), r#"{"type": "object"}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = DirectorySource::new(dir.path()).unwrap();
        assert_eq!(source.schema_count(), 1);
        assert!(source
            .fetch("https://schema.example.org/ska-tmc-scan/9.0")
            .unwrap()
            .is_some());
    }

    #[test]
    fn directory_source_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            DirectorySource::new(dir.path()),
            Err(SchemaError::Load { .. })
        ));
    }

    #[test]
    fn missing_directory_is_empty() {
        let source = DirectorySource::new("/definitely/not/a/schema/dir").unwrap();
        assert_eq!(source.schema_count(), 0);
    }

    #[test]
    fn first_layer_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("override.json"),
            r#"{"$id": "https://schema.skao.int/ska-tmc-scan/2.1", "title": "mirror"}"#,
        )
        .unwrap();
        let layered = LayeredSource::new()
            .push(DirectorySource::new(dir.path()).unwrap())
            .push(EmbeddedSchemas);
        assert_eq!(layered.layer_names(), vec!["directory", "embedded"]);

        let doc = layered
            .fetch("https://schema.skao.int/ska-tmc-scan/2.1")
            .unwrap()
            .unwrap();
        assert_eq!(doc["title"], "mirror");

        let doc = layered
            .fetch("https://schema.skao.int/ska-tmc-configure/2.3")
            .unwrap()
            .unwrap();
        assert_eq!(doc["title"], "TMC Mid Configure 2.3");
    }
}
