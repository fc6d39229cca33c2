//! Remote schema fetch over HTTP.
//!
//! Interface URIs are themselves resolvable URLs. [`HttpSource`] fetches
//! them directly, or from a mirror when a base URL is configured. The fetch
//! blocks the calling thread and is bounded by the client timeout; do not
//! call it from inside an async runtime.

use std::time::Duration;

use cdm_core::SCHEMA_URI_PREFIX;
use serde_json::Value;
use url::Url;

use crate::error::SchemaError;
use crate::source::SchemaSource;

/// Fetches schema documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    mirror: Option<Url>,
}

impl HttpSource {
    /// Build a source with the given timeout and optional mirror base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Fetch`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration, mirror: Option<Url>) -> Result<Self, SchemaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SchemaError::Fetch {
                uri: mirror.as_ref().map(Url::to_string).unwrap_or_default(),
                reason: e.to_string(),
            })?;
        Ok(Self { client, mirror })
    }

    /// The URL actually requested for `uri`.
    pub fn location(&self, uri: &str) -> Result<Url, SchemaError> {
        let target = match (&self.mirror, uri.strip_prefix(SCHEMA_URI_PREFIX)) {
            (Some(base), Some(path)) => base.join(path),
            _ => Url::parse(uri),
        };
        target.map_err(|e| SchemaError::Fetch {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }
}

impl SchemaSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, uri: &str) -> Result<Option<Value>, SchemaError> {
        let location = self.location(uri)?;
        let fetch_error = |reason: String| SchemaError::Fetch {
            uri: uri.to_string(),
            reason,
        };

        tracing::debug!(uri, url = %location, "fetching schema document");
        let response = self
            .client
            .get(location)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }
        response
            .json::<Value>()
            .map(Some)
            .map_err(|e| fetch_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_rewrites_prefix() {
        let mirror = Url::parse("http://127.0.0.1:8080/schemas/").unwrap();
        let source = HttpSource::new(Duration::from_secs(1), Some(mirror)).unwrap();
        let url = source
            .location("https://schema.skao.int/ska-tmc-scan/2.1")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/schemas/ska-tmc-scan/2.1");
    }

    #[test]
    fn without_mirror_uri_is_fetched_directly() {
        let source = HttpSource::new(Duration::from_secs(1), None).unwrap();
        let url = source
            .location("https://schema.skao.int/ska-tmc-scan/2.1")
            .unwrap();
        assert_eq!(url.as_str(), "https://schema.skao.int/ska-tmc-scan/2.1");
    }
}
