//! Elapsed time as a floating-point number of seconds.
//!
//! Values are carried with microsecond granularity so that a number of
//! seconds parsed from JSON converts back to the identical number.
//!
//! ```ignore
//! #[serde(with = "cdm_core::convert::duration_secs")]
//! scan_duration: chrono::Duration,
//! ```

use chrono::Duration;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Seconds represented by `duration`, or `None` if it overflows microseconds.
pub fn to_secs(duration: &Duration) -> Option<f64> {
    duration
        .num_microseconds()
        .map(|micros| micros as f64 / MICROS_PER_SEC)
}

/// Duration for a number of seconds, rounded to the nearest microsecond.
///
/// # Errors
///
/// Rejects non-finite input and values beyond the microsecond range.
pub fn from_secs(secs: f64) -> Result<Duration, String> {
    if !secs.is_finite() {
        return Err(format!("duration must be a finite number of seconds, got {secs}"));
    }
    let micros = (secs * MICROS_PER_SEC).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(format!("duration of {secs} seconds is out of range"));
    }
    Ok(Duration::microseconds(micros as i64))
}

/// Serialize as seconds.
pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let secs = to_secs(duration).ok_or_else(|| S::Error::custom("duration is out of range"))?;
    serializer.serialize_f64(secs)
}

/// Deserialize from seconds (integer or float).
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    from_secs(secs).map_err(D::Error::custom)
}

/// The same conversion for optional fields.
///
/// Pair with `default` and `skip_serializing_if = "Option::is_none"`.
pub mod option {
    use super::*;

    /// Serialize `Some` as seconds.
    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match duration {
            Some(d) => super::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional number of seconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| from_secs(secs).map_err(D::Error::custom))
            .transpose()
    }
}
