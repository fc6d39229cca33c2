//! # Interface URIs
//!
//! Every top-level message, and some nested sub-messages, carry an
//! `interface` string of the form
//! `https://schema.<authority>/<message-kind>/<major>.<minor>`. The string is
//! the lookup key for both structural schemas and semantic rule sets.

use crate::error::InterfaceError;

/// Prefix shared by every interface URI published by the observatory.
pub const SCHEMA_URI_PREFIX: &str = "https://schema.skao.int/";

/// A parsed interface URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceUri {
    authority: String,
    kind: String,
    major: u32,
    minor: u32,
}

impl InterfaceUri {
    /// Parse an interface URI.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError`] if the string is not of the documented form.
    pub fn parse(uri: &str) -> Result<Self, InterfaceError> {
        let rest = uri
            .strip_prefix("https://schema.")
            .ok_or_else(|| InterfaceError::BadForm(uri.to_string()))?;
        let mut parts = rest.trim_end_matches('/').split('/');
        let (Some(authority), Some(kind), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(InterfaceError::BadForm(uri.to_string()));
        };
        if authority.is_empty() || kind.is_empty() {
            return Err(InterfaceError::BadForm(uri.to_string()));
        }
        let bad_version = || InterfaceError::BadVersion {
            uri: uri.to_string(),
            version: version.to_string(),
        };
        let (major, minor) = version.split_once('.').ok_or_else(bad_version)?;
        Ok(Self {
            authority: authority.to_string(),
            kind: kind.to_string(),
            major: major.parse().map_err(|_| bad_version())?,
            minor: minor.parse().map_err(|_| bad_version())?,
        })
    }

    /// Build a URI under the observatory authority.
    pub fn skao(kind: &str, major: u32, minor: u32) -> Self {
        Self {
            authority: "skao.int".to_string(),
            kind: kind.to_string(),
            major,
            minor,
        }
    }

    /// The message-kind namespace, e.g. `ska-tmc-configure`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The publishing authority, e.g. `skao.int`.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// `(major, minor)`.
    pub fn version(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// Major version number.
    pub fn major(&self) -> u32 {
        self.major
    }
}

impl std::fmt::Display for InterfaceUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "https://schema.{}/{}/{}.{}",
            self.authority, self.kind, self.major, self.minor
        )
    }
}

impl std::str::FromStr for InterfaceUri {
    type Err = InterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
