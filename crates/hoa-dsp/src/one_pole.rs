//! One-pole low-pass
//!
//! `y[n] = y[n-1] + coeff * (x[n] - y[n-1])` with
//! `coeff = 1 - exp(-2π fc / sr)`. Cheap enough to run per source per sample
//! and used to darken distant sources.

use std::f64::consts::TAU;

use hoa_core::Sample;

use crate::{MonoProcessor, Processor, ProcessorConfig};

/// Lowest cutoff accepted, in Hz
pub const MIN_CUTOFF: f64 = 1.0;

/// One-pole low-pass filter
#[derive(Debug, Clone)]
pub struct OnePole {
    coeff: f64,
    state: f64,
    /// Cutoff as asked for, re-clamped when the sample rate changes
    requested: f64,
    /// Cutoff in use
    cutoff: f64,
    sample_rate: f64,
}

impl OnePole {
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        let mut filter = Self {
            coeff: 1.0,
            state: 0.0,
            requested: cutoff,
            cutoff,
            sample_rate,
        };
        filter.set_cutoff(cutoff);
        filter
    }

    /// Set the cutoff frequency, clamped to `[MIN_CUTOFF, nyquist]`
    pub fn set_cutoff(&mut self, cutoff: f64) {
        self.requested = cutoff;
        let nyquist = (self.sample_rate * 0.5).max(MIN_CUTOFF);
        self.cutoff = if cutoff.is_nan() {
            nyquist
        } else {
            cutoff.clamp(MIN_CUTOFF, nyquist)
        };
        self.update_coeff();
    }

    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    #[inline]
    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    fn update_coeff(&mut self) {
        let rate = self.sample_rate.max(1.0);
        self.coeff = (1.0 - (-TAU * self.cutoff / rate).exp()).clamp(0.0, 1.0);
    }
}

impl Processor for OnePole {
    fn reset(&mut self) {
        self.state = 0.0;
    }
}

impl MonoProcessor for OnePole {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        self.state += self.coeff * (input - self.state);
        self.state
    }
}

impl ProcessorConfig for OnePole {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.set_cutoff(self.requested);
    }
}
