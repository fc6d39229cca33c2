//! # Mid CSP Configuration
//!
//! The central signal processor part of a Mid scan configuration. It is
//! embedded in [`ConfigureRequest`](crate::ConfigureRequest) and may also be
//! sent on its own.
//!
//! Two correlator shapes coexist. Interfaces up to `ska-csp-configure/3.x`
//! carry a `cbf` block listing frequency slice processors; from 4.0 the
//! `midcbf` block describes processing regions instead. Both are optional
//! fields of the one [`CspConfiguration`] type and may not be combined.

use cdm_core::{check_max_len, check_range, FieldValidationError, Message, MessageKind, Validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{check_subarray_id, ReceiverBand};

/// Highest frequency slice processor number.
pub const MAX_FSP_ID: u8 = 27;

/// Highest frequency slice number.
pub const MAX_FREQUENCY_SLICE_ID: u8 = 26;

/// Most entries a channel averaging map may hold.
pub const MAX_CHANNEL_AVERAGING_ENTRIES: usize = 20;

/// Mid CSP configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CspConfiguration {
    /// Interface URI, e.g. `https://schema.skao.int/ska-csp-configure/2.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Subarray naming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarray: Option<SubarrayConfiguration>,
    /// Parameters common to every CSP function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonConfiguration>,
    /// Correlator configuration for interfaces before 4.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbf: Option<CbfConfiguration>,
    /// Correlator configuration from interface 4.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midcbf: Option<MidCbfConfiguration>,
    /// Pulsar search configuration, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pss: Option<Value>,
    /// Pulsar timing configuration, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pst: Option<Value>,
}

impl Validate for CspConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        if self.cbf.is_some() && self.midcbf.is_some() {
            return Err(FieldValidationError::MutuallyExclusive {
                message_type: "CspConfiguration",
                first: "cbf",
                second: "midcbf",
            });
        }
        self.common.validate()?;
        self.cbf.validate()?;
        self.midcbf.validate()
    }
}

impl Message for CspConfiguration {
    const KIND: MessageKind = MessageKind::CspConfiguration;

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

/// Subarray naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarrayConfiguration {
    /// Free-form subarray name.
    pub subarray_name: String,
}

/// Parameters common to every CSP function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonConfiguration {
    /// Scan configuration identifier. Emitted as `id` before interface 2.0.
    pub config_id: String,
    /// Frequency band; must match the dish receiver band.
    pub frequency_band: ReceiverBand,
    /// Subarray number; dropped from the interface at 4.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarray_id: Option<u8>,
    /// Stream tunings in GHz, required for bands 5a and 5b.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_5_tuning: Option<[f64; 2]>,
}

impl CommonConfiguration {
    /// Common parameters for `config_id` in `frequency_band`.
    pub fn new(config_id: impl Into<String>, frequency_band: ReceiverBand) -> Self {
        Self {
            config_id: config_id.into(),
            frequency_band,
            subarray_id: None,
            band_5_tuning: None,
        }
    }
}

impl Validate for CommonConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        if let Some(id) = self.subarray_id {
            check_subarray_id(id)?;
        }
        Ok(())
    }
}

/// Correlator configuration before interface 4.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CbfConfiguration {
    /// Frequency slice processors.
    pub fsp: Vec<FspConfiguration>,
}

impl Validate for CbfConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.fsp.validate()
    }
}

/// What a frequency slice processor computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FspFunctionMode {
    /// Correlation.
    #[serde(rename = "CORR")]
    Corr,
    /// Pulsar search beamforming.
    #[serde(rename = "PSS-BF")]
    PssBf,
    /// Pulsar timing beamforming.
    #[serde(rename = "PST-BF")]
    PstBf,
    /// Very long baseline interferometry.
    #[serde(rename = "VLBI")]
    Vlbi,
}

/// One frequency slice processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FspConfiguration {
    /// Processor number, 1..=27.
    pub fsp_id: u8,
    /// Function the processor performs.
    pub function_mode: FspFunctionMode,
    /// Frequency slice to process, 1..=26.
    pub frequency_slice_id: u8,
    /// Integration time in multiples of 140 ms, 1..=10.
    pub integration_factor: u8,
    /// Zoom window factor, 0..=6.
    pub zoom_factor: u8,
    /// `(start channel, averaging factor)` pairs, at most 20.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_averaging_map: Vec<(u32, u32)>,
    /// `(start channel, output link)` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_link_map: Vec<(u32, u32)>,
    /// Channel number offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_offset: Option<u32>,
    /// Zoom window centre frequency in kHz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_window_tuning: Option<u32>,
}

impl FspConfiguration {
    /// A processor with no maps or tuning.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError::OutOfRange`] for any value outside
    /// its documented range.
    pub fn new(
        fsp_id: u8,
        function_mode: FspFunctionMode,
        frequency_slice_id: u8,
        integration_factor: u8,
        zoom_factor: u8,
    ) -> Result<Self, FieldValidationError> {
        let fsp = Self {
            fsp_id,
            function_mode,
            frequency_slice_id,
            integration_factor,
            zoom_factor,
            channel_averaging_map: Vec::new(),
            output_link_map: Vec::new(),
            channel_offset: None,
            zoom_window_tuning: None,
        };
        fsp.validate()?;
        Ok(fsp)
    }

    /// Replace the channel averaging map.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValidationError::TooMany`] beyond 20 entries.
    pub fn with_channel_averaging_map(mut self, map: Vec<(u32, u32)>) -> Result<Self, FieldValidationError> {
        check_max_len("channel_averaging_map", map.len(), MAX_CHANNEL_AVERAGING_ENTRIES)?;
        self.channel_averaging_map = map;
        Ok(self)
    }

    /// Replace the output link map.
    pub fn with_output_link_map(mut self, map: Vec<(u32, u32)>) -> Self {
        self.output_link_map = map;
        self
    }
}

impl Validate for FspConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        check_range("fsp_id", self.fsp_id, 1, MAX_FSP_ID)?;
        check_range("frequency_slice_id", self.frequency_slice_id, 1, MAX_FREQUENCY_SLICE_ID)?;
        check_range("integration_factor", self.integration_factor, 1, 10)?;
        check_range("zoom_factor", self.zoom_factor, 0, 6)?;
        check_max_len(
            "channel_averaging_map",
            self.channel_averaging_map.len(),
            MAX_CHANNEL_AVERAGING_ENTRIES,
        )
    }
}

/// Correlator configuration from interface 4.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MidCbfConfiguration {
    /// Frequency offset of stream 1 in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_band_offset_stream1: Option<i64>,
    /// Frequency offset of stream 2 in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_band_offset_stream2: Option<i64>,
    /// Visibility correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationConfiguration>,
}

impl Validate for MidCbfConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.correlation.validate()
    }
}

/// Visibility correlation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationConfiguration {
    /// Contiguous frequency ranges and the processors covering them.
    pub processing_regions: Vec<ProcessingRegion>,
}

impl Validate for CorrelationConfiguration {
    fn validate(&self) -> Result<(), FieldValidationError> {
        self.processing_regions.validate()
    }
}

/// A contiguous frequency range correlated by a set of processors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRegion {
    /// Processors assigned to the region.
    pub fsp_ids: Vec<u8>,
    /// Dishes included; all subarray dishes when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receptors: Vec<String>,
    /// Centre of the first channel in Hz.
    pub start_freq: u64,
    /// Channel width in Hz.
    pub channel_width: u32,
    /// Number of channels.
    pub channel_count: u32,
    /// First SDP channel identifier.
    pub sdp_start_channel_id: u32,
    /// Integration time in multiples of 140 ms, 1..=10.
    pub integration_factor: u8,
}

impl Validate for ProcessingRegion {
    fn validate(&self) -> Result<(), FieldValidationError> {
        for id in &self.fsp_ids {
            check_range("fsp_ids", *id, 1, MAX_FSP_ID)?;
        }
        check_range("integration_factor", self.integration_factor, 1, 10)
    }
}
