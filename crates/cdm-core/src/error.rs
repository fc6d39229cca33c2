//! # Error Hierarchy
//!
//! Object-model errors shared by every crate in the workspace, built with
//! `thiserror`. These are the errors a converter raises when a value breaks
//! an invariant of the data model itself. They are deliberately separate
//! from schema validation errors (which live in `cdm-schema`) so callers can
//! tell "the object model rejected this" apart from "the published schema
//! rejected this".

use thiserror::Error;

/// A value failed an object-model invariant.
///
/// Raised at construction time by validating constructors and by the codec
/// on every serialize/deserialize call. Never retried by the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldValidationError {
    /// A required field (or nested sub-message) is absent.
    #[error("{message_type}: required field \"{field}\" is missing")]
    MissingField {
        /// The message type being built.
        message_type: &'static str,
        /// The JSON key or attribute name that is missing.
        field: &'static str,
    },

    /// A numeric value lies outside its documented inclusive range.
    #[error("{field} must be between {min} and {max} inclusive, got {value}")]
    OutOfRange {
        /// The attribute name.
        field: &'static str,
        /// The rejected value, rendered for diagnostics.
        value: String,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },

    /// A collection has more entries than permitted.
    #[error("{field} may hold at most {max} entries, got {len}")]
    TooMany {
        /// The attribute name.
        field: &'static str,
        /// Number of entries supplied.
        len: usize,
        /// Maximum number of entries.
        max: usize,
    },

    /// Two fields were supplied that may not be combined.
    #[error("{message_type}: {first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        /// The message type being built.
        message_type: &'static str,
        /// First conflicting attribute.
        first: &'static str,
        /// Second conflicting attribute.
        second: &'static str,
    },

    /// A value is not a member of its permitted set.
    #[error("{field}: \"{value}\" is not one of {allowed}")]
    NotPermitted {
        /// The attribute name.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The permitted values, rendered for diagnostics.
        allowed: String,
    },

    /// The JSON-able structure could not be mapped onto the message type
    /// (wrong JSON type, unknown enum value, absent required key).
    #[error("cannot construct {message_type}: {reason}")]
    Malformed {
        /// The message type being built.
        message_type: &'static str,
        /// Human-readable reason, usually from the deserializer.
        reason: String,
    },
}

/// An interface URI could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    /// The URI does not start with `https://schema.`.
    #[error("interface URI \"{0}\" is not of the form https://schema.<authority>/<kind>/<major>.<minor>")]
    BadForm(String),

    /// The trailing version segment is not `<major>.<minor>`.
    #[error("interface URI \"{uri}\" has an invalid version \"{version}\"")]
    BadVersion {
        /// The full URI.
        uri: String,
        /// The offending version segment.
        version: String,
    },
}

/// Check that `value` lies in `min..=max`.
///
/// # Errors
///
/// Returns [`FieldValidationError::OutOfRange`] otherwise.
pub fn check_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<(), FieldValidationError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(FieldValidationError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// Check that a collection holds at most `max` entries.
///
/// # Errors
///
/// Returns [`FieldValidationError::TooMany`] otherwise.
pub fn check_max_len(field: &'static str, len: usize, max: usize) -> Result<(), FieldValidationError> {
    if len > max {
        return Err(FieldValidationError::TooMany { field, len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_accepts_bounds() {
        assert!(check_range("fsp_id", 1, 1, 27).is_ok());
        assert!(check_range("fsp_id", 27, 1, 27).is_ok());
    }

    #[test]
    fn range_rejects_outside() {
        let err = check_range("fsp_id", 28, 1, 27).unwrap_err();
        assert_eq!(
            err.to_string(),
            "fsp_id must be between 1 and 27 inclusive, got 28"
        );
        assert!(check_range("zoom_factor", -1, 0, 6).is_err());
    }

    #[test]
    fn max_len_display() {
        let err = check_max_len("channel_averaging_map", 21, 20).unwrap_err();
        assert!(err.to_string().contains("at most 20"));
        assert!(check_max_len("channel_averaging_map", 20, 20).is_ok());
    }

    #[test]
    fn mutually_exclusive_display() {
        let err = FieldValidationError::MutuallyExclusive {
            message_type: "CspConfiguration",
            first: "cbf",
            second: "midcbf",
        };
        assert_eq!(
            err.to_string(),
            "CspConfiguration: cbf and midcbf are mutually exclusive"
        );
    }

    #[test]
    fn interface_error_display() {
        let err = InterfaceError::BadForm("foo".to_string());
        assert!(err.to_string().contains("\"foo\""));
    }
}
