//! Low scan configuration.

use cdm_core::convert::upper_case;
use cdm_core::{check_range, FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};

use super::csp::LowCspConfiguration;
use super::{MAX_SUBARRAY_BEAM_ID, MIN_SUBARRAY_BEAM_ID};
use crate::common::TmcConfiguration;
use crate::sdp::SdpScanConfiguration;

/// Configure a Low subarray for a scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LowConfigureRequest {
    /// Interface URI, e.g. `https://schema.skao.int/ska-low-tmc-configure/4.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Transaction identifier for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Station beamforming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mccs: Option<MccsConfiguration>,
    /// Science data processor setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<SdpScanConfiguration>,
    /// Central signal processor setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csp: Option<LowCspConfiguration>,
    /// Telescope manager setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmc: Option<TmcConfiguration>,
}

impl Validate for LowConfigureRequest {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.mccs.validate()?;
        self.sdp.validate()?;
        self.csp.validate()?;
        self.tmc.validate()
    }
}

impl Message for LowConfigureRequest {
    const KIND: MessageKind = MessageKind::LowConfigureRequest;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// Station beamforming.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MccsConfiguration {
    /// Subarray beams to form.
    pub subarray_beams: Vec<SubarrayBeamConfiguration>,
}

impl Validate for MccsConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.subarray_beams.validate()
    }
}

/// One subarray beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubarrayBeamConfiguration {
    /// Beam number, 1..=48.
    pub subarray_beam_id: u8,
    /// Pointing update rate in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rate: Option<f64>,
    /// Frequency bands to beamform.
    pub logical_bands: Vec<SubarrayBeamLogicalBand>,
    /// Station apertures contributing to the beam.
    pub apertures: Vec<SubarrayBeamAperture>,
    /// Where the beam points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky_coordinates: Option<SubarrayBeamTarget>,
}

impl Validate for SubarrayBeamConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        check_range(
            "subarray_beam_id",
            self.subarray_beam_id,
            MIN_SUBARRAY_BEAM_ID,
            MAX_SUBARRAY_BEAM_ID,
        )
    }
}

/// A contiguous block of coarse channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarrayBeamLogicalBand {
    /// First coarse channel.
    pub start_channel: u16,
    /// Number of channels.
    pub number_of_channels: u16,
}

/// One station aperture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarrayBeamAperture {
    /// Aperture identifier, e.g. `AP001.01`.
    pub aperture_id: String,
    /// Weighting key for the aperture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighting_key_ref: Option<String>,
}

/// Beam pointing. The frame is stored lower-case and emitted upper-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubarrayBeamTarget {
    /// Reference frame, e.g. `icrs` or `horizon`.
    #[serde(with = "upper_case")]
    pub reference_frame: String,
    /// First coordinate in degrees.
    pub c1: f64,
    /// Second coordinate in degrees.
    pub c2: f64,
}

impl SubarrayBeamTarget {
    /// A pointing in `reference_frame`, stored lower-case.
    pub fn new(reference_frame: &str, c1: f64, c2: f64) -> Self {
        Self {
            reference_frame: reference_frame.to_ascii_lowercase(),
            c1,
            c2,
        }
    }
}
