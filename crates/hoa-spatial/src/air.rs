//! Air absorption for distant sources

use hoa_core::Sample;
use hoa_dsp::{MonoProcessor, OnePole, Processor, ProcessorConfig};

/// Cutoff on and inside the loudspeaker circle, in Hz
pub const AIR_MAX_CUTOFF: f64 = 20000.0;
/// Lowest cutoff reached far away, in Hz
pub const AIR_MIN_CUTOFF: f64 = 800.0;

/// Low-pass cutoff for a source at `radius`.
///
/// Falls with the square of the distance beyond the unit circle, like the
/// gain law.
#[inline]
pub fn air_cutoff(radius: f64) -> f64 {
    if radius > 1.0 {
        (AIR_MAX_CUTOFF / (radius * radius)).max(AIR_MIN_CUTOFF)
    } else {
        AIR_MAX_CUTOFF
    }
}

/// Per-source air absorption filter
#[derive(Debug, Clone)]
pub struct AirAbsorption {
    filter: OnePole,
    /// Radius the cutoff was last computed for
    radius: f64,
}

impl AirAbsorption {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            filter: OnePole::new(AIR_MAX_CUTOFF, sample_rate),
            radius: 1.0,
        }
    }

    /// Filter one sample of a source currently at `radius`
    #[inline]
    pub fn process(&mut self, input: Sample, radius: f64) -> Sample {
        if radius != self.radius {
            self.radius = radius;
            self.filter.set_cutoff(air_cutoff(radius));
        }
        self.filter.process_sample(input)
    }

    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.filter.cutoff()
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.filter.set_sample_rate(sample_rate);
    }
}
