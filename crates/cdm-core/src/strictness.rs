//! # Validation Strictness
//!
//! An ordered policy level deciding whether a validation failure aborts the
//! call, is logged as a warning, or is ignored. The codec is the only
//! consumer of the gating table ([`Strictness::reaction`]); schema sources
//! and converters always report failures unconditionally.
//!
//! ## Precedence
//!
//! The effective level of a call is resolved by [`StrictnessPolicy::resolve`]:
//! environment override, then the per-call level, then the configured
//! default. Operators set the override in CI to force strict validation
//! without touching call sites.

use serde::{Deserialize, Serialize};

/// Ordered validation strictness, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strictness {
    /// Validation is not run at all.
    Permissive,
    /// Validation runs; outcomes are only reported at debug level.
    Agnostic,
    /// Basic structural and semantic failures are warnings.
    BasicWarn,
    /// Basic structural failures raise; everything else warns.
    BasicError,
    /// Every failure raises, including an unknown schema.
    AllError,
}

/// The kind of validation failure being gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The interface URI did not resolve to a schema.
    SchemaNotFound,
    /// The instance failed the schema as published.
    BasicStructural,
    /// The instance failed the schema with unknown keys forbidden.
    StrictStructural,
    /// A cross-field business rule was violated.
    Semantic,
}

/// What the codec does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Abort the call with the error.
    Raise,
    /// Log the error at warn level and continue.
    Warn,
    /// Log the error at debug level and continue.
    Ignore,
}

impl Strictness {
    /// Every level, lowest first.
    pub const ALL: [Strictness; 5] = [
        Self::Permissive,
        Self::Agnostic,
        Self::BasicWarn,
        Self::BasicError,
        Self::AllError,
    ];

    /// The numeric level used on the command line and in the environment.
    pub fn level(self) -> i8 {
        match self {
            Self::Permissive => -9,
            Self::Agnostic => -1,
            Self::BasicWarn => 0,
            Self::BasicError => 1,
            Self::AllError => 2,
        }
    }

    /// Look up a level by its number.
    pub fn from_level(level: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| i64::from(s.level()) == level)
    }

    /// The canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Permissive => "PERMISSIVE",
            Self::Agnostic => "AGNOSTIC",
            Self::BasicWarn => "BASIC_WARN",
            Self::BasicError => "BASIC_ERROR",
            Self::AllError => "ALL_ERROR",
        }
    }

    /// Whether validation runs at all at this level.
    pub fn validates(self) -> bool {
        self != Self::Permissive
    }

    /// The gating table.
    pub fn reaction(self, class: FailureClass) -> Reaction {
        use FailureClass::*;
        match (self, class) {
            (Self::Permissive | Self::Agnostic, _) => Reaction::Ignore,
            (Self::BasicWarn, StrictStructural) => Reaction::Ignore,
            (Self::BasicWarn, _) => Reaction::Warn,
            (Self::BasicError, BasicStructural) => Reaction::Raise,
            (Self::BasicError, _) => Reaction::Warn,
            (Self::AllError, _) => Reaction::Raise,
        }
    }
}

impl Default for Strictness {
    fn default() -> Self {
        Self::BasicError
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.level())
    }
}

/// A strictness string was neither a known level number nor a known name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strictness \"{0}\" (expected one of -9, -1, 0, 1, 2 or PERMISSIVE, AGNOSTIC, BASIC_WARN, BASIC_ERROR, ALL_ERROR)")]
pub struct ParseStrictnessError(pub String);

impl std::str::FromStr for Strictness {
    type Err = ParseStrictnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(level) = trimmed.parse::<i64>() {
            return Self::from_level(level).ok_or_else(|| ParseStrictnessError(s.to_string()));
        }
        let wanted = trimmed.to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|l| l.name() == wanted)
            .ok_or_else(|| ParseStrictnessError(s.to_string()))
    }
}

/// Resolves the effective strictness of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrictnessPolicy {
    /// Level used when the call does not name one.
    pub default: Strictness,
    /// Process-wide override, normally read from the environment.
    pub env_override: Option<Strictness>,
}

impl StrictnessPolicy {
    /// Policy with the given default and no override.
    pub fn with_default(default: Strictness) -> Self {
        Self {
            default,
            env_override: None,
        }
    }

    /// Environment override, then explicit argument, then default.
    pub fn resolve(&self, explicit: Option<Strictness>) -> Strictness {
        self.env_override.or(explicit).unwrap_or(self.default)
    }
}
