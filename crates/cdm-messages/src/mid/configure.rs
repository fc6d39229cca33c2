//! # Mid Scan Configuration
//!
//! [`ConfigureRequest`] prepares a Mid subarray for the next scan: where to
//! point, which receiver band to use, and how CSP, SDP and the telescope
//! manager should process it.
//!
//! The pointing [`Target`] is a union discriminated by `reference_frame`.
//! The tag is matched case-insensitively and always emitted upper-case.
//! When the tag is absent, each variant is tried in declaration order and
//! the first that fits the shape wins.

use cdm_core::convert::upper_case;
use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::common::{ReceiverBand, TmcConfiguration};
use crate::csp::CspConfiguration;
use crate::sdp::SdpScanConfiguration;

/// Configure a Mid subarray for a scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigureRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-tmc-configure/2.3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Where to point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointing: Option<PointingConfiguration>,
    /// Dish receiver setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<DishConfiguration>,
    /// Central signal processor setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csp: Option<CspConfiguration>,
    /// Science data processor setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<SdpScanConfiguration>,
    /// Telescope manager setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmc: Option<TmcConfiguration>,
}

impl Validate for ConfigureRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.csp.validate()?;
        self.sdp.validate()?;
        self.tmc.validate()
    }
}

impl Message for ConfigureRequest {
    const KIND: MessageKind = MessageKind::ConfigureRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// Dish receiver setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishConfiguration {
    /// Receiver band.
    pub receiver_band: ReceiverBand,
}

/// Pointing setup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointingConfiguration {
    /// Pointing target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// What to do with pointing corrections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<PointingCorrection>,
}

/// Pointing correction handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PointingCorrection {
    /// Keep the current corrections.
    Maintain,
    /// Apply new corrections.
    Update,
    /// Discard corrections.
    Reset,
}

/// A sidereal target in ICRS coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcrsTarget {
    /// Target name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_name: String,
    /// Right ascension, sexagesimal hours.
    pub ra: String,
    /// Declination, sexagesimal degrees.
    pub dec: String,
    /// Cross-elevation offset in arcseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_offset_arcsec: Option<f64>,
    /// Elevation offset in arcseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ie_offset_arcsec: Option<f64>,
}

/// A fixed horizontal position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltAzTarget {
    /// Target name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_name: String,
    /// Azimuth in degrees.
    pub az: f64,
    /// Elevation in degrees.
    pub el: f64,
}

/// A solar-system body tracked by name, e.g. `Sun`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTarget {
    /// Body name.
    pub target_name: String,
}

/// A pointing target, discriminated by `reference_frame`.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// `reference_frame: "ICRS"`.
    Icrs(IcrsTarget),
    /// `reference_frame: "ALTAZ"`.
    AltAz(AltAzTarget),
    /// `reference_frame: "SPECIAL"`.
    Special(SpecialTarget),
}

impl Target {
    /// Every reference frame tag, in matching priority order.
    pub const FRAMES: [&'static str; 3] = ["ICRS", "ALTAZ", "SPECIAL"];

    /// A sidereal target.
    pub fn icrs(target_name: impl Into<String>, ra: impl Into<String>, dec: impl Into<String>) -> Self {
        Self::Icrs(IcrsTarget {
            target_name: target_name.into(),
            ra: ra.into(),
            dec: dec.into(),
            ca_offset_arcsec: None,
            ie_offset_arcsec: None,
        })
    }

    /// The upper-case reference frame tag.
    pub fn reference_frame(&self) -> &'static str {
        match self {
            Self::Icrs(_) => Self::FRAMES[0],
            Self::AltAz(_) => Self::FRAMES[1],
            Self::Special(_) => Self::FRAMES[2],
        }
    }

    /// The target name, empty when unnamed.
    pub fn target_name(&self) -> &str {
        match self {
            Self::Icrs(t) => &t.target_name,
            Self::AltAz(t) => &t.target_name,
            Self::Special(t) => &t.target_name,
        }
    }

    fn from_frame(frame: &str, body: Value) -> Result<Self, serde_json::Error> {
        match frame {
            "ICRS" => serde_json::from_value(body).map(Self::Icrs),
            "ALTAZ" => serde_json::from_value(body).map(Self::AltAz),
            "SPECIAL" => serde_json::from_value(body).map(Self::Special),
            other => Err(serde_json::Error::custom(format!(
                "unknown reference_frame \"{other}\", expected one of {:?}",
                Self::FRAMES
            ))),
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    reference_frame: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reference_frame = self.reference_frame();
        match self {
            Self::Icrs(body) => Tagged { reference_frame, body }.serialize(serializer),
            Self::AltAz(body) => Tagged { reference_frame, body }.serialize(serializer),
            Self::Special(body) => Tagged { reference_frame, body }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        if !body.is_object() {
            return Err(D::Error::custom("target must be an object"));
        }

        match body.get("reference_frame") {
            Some(Value::String(frame)) => {
                Self::from_frame(&upper_case::fold(frame), body.clone()).map_err(D::Error::custom)
            }
            Some(other) => Err(D::Error::custom(format!("reference_frame must be a string, got {other}"))),
            None => Self::FRAMES
                .iter()
                .find_map(|frame| Self::from_frame(frame, body.clone()).ok())
                .ok_or_else(|| D::Error::custom("target matches no reference frame shape")),
        }
    }
}
