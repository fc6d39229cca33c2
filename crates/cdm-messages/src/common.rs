//! Sub-messages shared by Mid and Low requests.

use cdm_core::convert::{duration_secs, is_false};
use cdm_core::{check_range, FieldValidationError, Validate};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Lowest valid subarray number.
pub const MIN_SUBARRAY_ID: u8 = 1;

/// Highest valid subarray number.
pub const MAX_SUBARRAY_ID: u8 = 16;

/// Check a subarray number.
///
/// # Errors
///
/// Returns [`FieldValidationError::OutOfRange`] outside
/// [`MIN_SUBARRAY_ID`]..=[`MAX_SUBARRAY_ID`].
pub fn check_subarray_id(subarray_id: u8) -> Result<(), FieldValidationError> {
    check_range("subarray_id", subarray_id, MIN_SUBARRAY_ID, MAX_SUBARRAY_ID)
}

/// Dishes allocated to (or released from) a Mid subarray.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DishAllocation {
    /// Dish identifiers, e.g. `SKA001`.
    #[serde(default)]
    pub receptor_ids: Vec<String>,
}

impl DishAllocation {
    /// Allocation of the given dishes.
    pub fn new<I, S>(receptor_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            receptor_ids: receptor_ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validate for DishAllocation {
    fn validate(&self) -> Result<(), FieldValidationError> {
        Ok(())
    }
}

/// Mid receiver band. Also names the CSP frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiverBand {
    /// Band 1.
    #[serde(rename = "1")]
    Band1,
    /// Band 2.
    #[serde(rename = "2")]
    Band2,
    /// Band 3.
    #[serde(rename = "3")]
    Band3,
    /// Band 4.
    #[serde(rename = "4")]
    Band4,
    /// Band 5a.
    #[serde(rename = "5a")]
    Band5a,
    /// Band 5b.
    #[serde(rename = "5b")]
    Band5b,
}

impl ReceiverBand {
    /// Whether the band needs `band_5_tuning` in the CSP configuration.
    pub fn is_band_5(self) -> bool {
        matches!(self, Self::Band5a | Self::Band5b)
    }
}

/// Telescope-manager parameters of a scan configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmcConfiguration {
    /// How long the configured scan runs; emitted as seconds.
    #[serde(default, with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub scan_duration: Option<Duration>,
    /// Only the supplied parts of the configuration are applied.
    #[serde(default, skip_serializing_if = "is_false")]
    pub partial_configuration: bool,
}

impl TmcConfiguration {
    /// Configuration for a scan of the given length.
    pub fn with_scan_duration(scan_duration: Duration) -> Self {
        Self {
            scan_duration: Some(scan_duration),
            partial_configuration: false,
        }
    }
}

impl Validate for TmcConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        match self.scan_duration {
            Some(d) if d < Duration::zero() => Err(FieldValidationError::OutOfRange {
                field: "scan_duration",
                value: d.to_string(),
                min: "0".to_string(),
                max: "unbounded".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subarray_range() {
        assert!(check_subarray_id(1).is_ok());
        assert!(check_subarray_id(16).is_ok());
        assert!(check_subarray_id(0).is_err());
        assert!(check_subarray_id(17).is_err());
    }

    #[test]
    fn band_values_are_wire_strings() {
        assert_eq!(serde_json::to_value(ReceiverBand::Band5a).unwrap(), json!("5a"));
        assert_eq!(serde_json::from_value::<ReceiverBand>(json!("1")).unwrap(), ReceiverBand::Band1);
        assert!(serde_json::from_value::<ReceiverBand>(json!("6")).is_err());
    }

    #[test]
    fn tmc_duration_is_seconds() {
        let tmc = TmcConfiguration::with_scan_duration(Duration::microseconds(123_450_000));
        assert_eq!(serde_json::to_value(&tmc).unwrap(), json!({"scan_duration": 123.45}));

        let back: TmcConfiguration = serde_json::from_value(json!({"scan_duration": 123.45})).unwrap();
        assert_eq!(back, tmc);
    }

    #[test]
    fn partial_configuration_omitted_when_false() {
        let tmc = TmcConfiguration {
            scan_duration: None,
            partial_configuration: true,
        };
        assert_eq!(serde_json::to_value(&tmc).unwrap(), json!({"partial_configuration": true}));
        assert_eq!(serde_json::to_value(TmcConfiguration::default()).unwrap(), json!({}));
    }

    #[test]
    fn negative_duration_rejected() {
        let tmc = TmcConfiguration::with_scan_duration(Duration::seconds(-1));
        assert!(tmc.validate().is_err());
    }
}
