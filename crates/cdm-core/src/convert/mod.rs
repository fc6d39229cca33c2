//! # Field Transformers
//!
//! Small, reusable conversion rules that per-type converters compose:
//!
//! - [`duration_secs`]: elapsed-time values on the wire as plain seconds.
//! - [`upper_case`]: strings emitted upper-cased, stored lower-cased.
//! - [`transform`]: in-place edits of the JSON-able structure (key renames,
//!   conditional field stripping, null omission) run by the codec pipeline.
//!
//! Enum members are written as their string value through serde renames on
//! each enum; unknown strings fail deserialization.

pub mod duration_secs;
pub mod transform;
pub mod upper_case;

/// Serde `skip_serializing_if` helper for flags whose default is `false`.
pub fn is_false(value: &bool) -> bool {
    !*value
}
