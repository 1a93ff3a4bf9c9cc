//! Encoder configuration

use hoa_dsp::ms_to_samples;
use serde::{Deserialize, Serialize};

use crate::error::{SpatialError, SpatialResult};
use crate::hoa::MAX_SPHERICAL_ORDER;

/// Harmonic decomposition used by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// 2D circular harmonics
    #[default]
    Circular,
    /// 3D spherical harmonics, sources on the horizontal plane
    Spherical,
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Decomposition order; 0 encodes the omni channel only
    pub order: usize,
    /// Number of source slots (>= 1)
    pub number_of_sources: usize,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Ramp time for radius/azimuth changes, in milliseconds
    pub ramp_ms: f64,
    /// Largest block handed to one internal pass; longer blocks are chunked
    pub max_block_size: usize,
    pub dimension: Dimension,
    /// Low-pass sources beyond the loudspeaker circle
    pub air_absorption: bool,
    /// Spread sources inside the loudspeaker circle
    pub widening: bool,
    /// Capacity of the control command queue
    pub control_capacity: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            order: 1,
            number_of_sources: 1,
            sample_rate: 44100.0,
            ramp_ms: 100.0,
            max_block_size: 8192,
            dimension: Dimension::Circular,
            air_absorption: false,
            widening: true,
            control_capacity: 1024,
        }
    }
}

impl EncoderConfig {
    pub fn new(order: usize, number_of_sources: usize, sample_rate: f64, ramp_ms: f64) -> Self {
        Self {
            order,
            number_of_sources,
            sample_rate,
            ramp_ms,
            ..Default::default()
        }
    }

    /// Check that an encoder can be built from this configuration
    pub fn validate(&self) -> SpatialResult<()> {
        if self.dimension == Dimension::Spherical && self.order > MAX_SPHERICAL_ORDER {
            return Err(SpatialError::InvalidAmbisonicOrder(self.order));
        }
        if self.number_of_sources == 0 {
            return Err(SpatialError::InvalidConfiguration(
                "at least one source is required".into(),
            ));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(SpatialError::InvalidConfiguration(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.max_block_size == 0 {
            return Err(SpatialError::InvalidConfiguration(
                "max block size must be at least 1".into(),
            ));
        }
        if self.control_capacity == 0 {
            return Err(SpatialError::InvalidConfiguration(
                "control queue capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Ramp length in samples (at least 1)
    pub fn ramp_samples(&self) -> usize {
        ms_to_samples(self.ramp_ms, self.sample_rate)
    }

    pub fn from_json(json: &str) -> SpatialResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SpatialResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
