//! Codec configuration.
//!
//! Read once from the environment by [`CodecConfig::from_env`], or built
//! directly for tests and embedded use. The strictness override is the
//! operator's lever: when `VALIDATION_STRICTNESS` is set it wins over
//! every per-call level.

use std::path::PathBuf;
use std::time::Duration;

use cdm_core::{ParseStrictnessError, Strictness, StrictnessPolicy};
use cdm_schema::{DirectorySource, EmbeddedSchemas, LayeredSource, SchemaError};
#[cfg(feature = "remote")]
use url::Url;

/// Environment variable holding the strictness override.
pub const STRICTNESS_VAR: &str = "VALIDATION_STRICTNESS";
/// Environment variable naming a local schema directory.
pub const SCHEMA_DIR_VAR: &str = "CDM_SCHEMA_DIR";
/// Environment variable naming a remote schema mirror.
pub const SCHEMA_URL_VAR: &str = "CDM_SCHEMA_URL";
/// Environment variable holding the remote fetch timeout in seconds.
pub const FETCH_TIMEOUT_VAR: &str = "CDM_SCHEMA_FETCH_TIMEOUT_SECS";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `VALIDATION_STRICTNESS` is neither a level number nor a level name.
    #[error("invalid VALIDATION_STRICTNESS: {0}")]
    InvalidStrictness(#[from] ParseStrictnessError),
    /// A URL variable does not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// The fetch timeout is not a whole number of seconds.
    #[error("invalid CDM_SCHEMA_FETCH_TIMEOUT_SECS \"{0}\": expected a whole number of seconds")]
    InvalidTimeout(String),
}

/// Settings for building a [`Codec`](crate::Codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Process-wide level that beats every per-call level.
    pub strictness_override: Option<Strictness>,
    /// Level used when a call does not name one.
    pub default_strictness: Strictness,
    /// Directory of schema documents consulted before the bundled ones.
    pub schema_dir: Option<PathBuf>,
    /// Base URL of a remote schema mirror, consulted last.
    #[cfg(feature = "remote")]
    pub schema_url: Option<Url>,
    /// Remote fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strictness_override: None,
            default_strictness: Strictness::default(),
            schema_dir: None,
            #[cfg(feature = "remote")]
            schema_url: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VALIDATION_STRICTNESS` (level number or name, default: unset)
    /// - `CDM_SCHEMA_DIR` (default: unset)
    /// - `CDM_SCHEMA_URL` (`remote` feature only, default: unset)
    /// - `CDM_SCHEMA_FETCH_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let strictness_override = get(STRICTNESS_VAR).map(|raw| raw.parse::<Strictness>()).transpose()?;

        let fetch_timeout_secs = match get(FETCH_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        #[cfg(feature = "remote")]
        let schema_url = get(SCHEMA_URL_VAR)
            .map(|raw| Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(SCHEMA_URL_VAR.to_string(), e.to_string())))
            .transpose()?;
        #[cfg(not(feature = "remote"))]
        if get(SCHEMA_URL_VAR).is_some() {
            tracing::warn!("{SCHEMA_URL_VAR} is set but remote schema fetch is not compiled in");
        }

        Ok(Self {
            strictness_override,
            default_strictness: Strictness::default(),
            schema_dir: get(SCHEMA_DIR_VAR).map(PathBuf::from),
            #[cfg(feature = "remote")]
            schema_url,
            fetch_timeout_secs,
        })
    }

    /// The strictness policy these settings describe.
    pub fn policy(&self) -> StrictnessPolicy {
        StrictnessPolicy {
            default: self.default_strictness,
            env_override: self.strictness_override,
        }
    }

    /// The remote fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Stack the configured schema sources: local directory, bundled
    /// documents, then the remote mirror.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] of a directory that cannot be scanned or
    /// an HTTP client that cannot be built.
    pub fn schema_source(&self) -> Result<LayeredSource, SchemaError> {
        let mut source = LayeredSource::new();
        if let Some(dir) = &self.schema_dir {
            source = source.push(DirectorySource::new(dir.clone())?);
        }
        source = source.push(EmbeddedSchemas);
        #[cfg(feature = "remote")]
        if let Some(url) = &self.schema_url {
            source = source.push(cdm_schema::HttpSource::new(self.fetch_timeout(), Some(url.clone()))?);
        }
        Ok(source)
    }
}
