//! Low CSP configuration.

use cdm_core::{FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};

use crate::common::check_subarray_id;

/// Low CSP configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LowCspConfiguration {
    /// Interface URI, e.g. `https://schema.skao.int/ska-low-csp-configure/3.2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Parameters common to every CSP function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<LowCommonConfiguration>,
    /// Correlator and beamformer setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowcbf: Option<LowCbfConfiguration>,
}

impl Validate for LowCspConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        match self.common.as_ref().and_then(|c| c.subarray_id) {
            Some(id) => check_subarray_id(id),
            None => Ok(()),
        }
    }
}

impl Message for LowCspConfiguration {
    const KIND: MessageKind = MessageKind::LowCspConfiguration;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// Parameters common to every Low CSP function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowCommonConfiguration {
    /// Scan configuration identifier.
    pub config_id: String,
    /// Subarray number, 1..=16.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarray_id: Option<u8>,
    /// Execution block identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eb_id: Option<String>,
}

/// Correlator and beamformer setup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LowCbfConfiguration {
    /// Stations and station beams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations: Option<StationConfiguration>,
    /// Visibility correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<VisConfiguration>,
}

/// Stations and the beams they form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StationConfiguration {
    /// `(station, substation)` pairs.
    pub stns: Vec<(u16, u16)>,
    /// Station beams.
    pub stn_beams: Vec<StationBeamConfiguration>,
}

/// One station beam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationBeamConfiguration {
    /// Beam number.
    pub beam_id: u16,
    /// Coarse frequency channels.
    pub freq_ids: Vec<u16>,
}

/// Visibility correlation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisConfiguration {
    /// Processors running the correlator.
    pub fsp: VisFspConfiguration,
    /// Station beams to correlate.
    pub stn_beams: Vec<VisStationBeam>,
}

/// Processors running the correlator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisFspConfiguration {
    /// Firmware image name.
    pub firmware: String,
    /// Processor numbers.
    pub fsp_ids: Vec<u8>,
}

/// A station beam fed into the correlator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisStationBeam {
    /// The station beam, by `beam_id`.
    pub stn_beam_id: u16,
    /// Integration time in milliseconds.
    pub integration_ms: u32,
}
