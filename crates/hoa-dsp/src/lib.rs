//! hoa-dsp: Control-rate smoothing and gain processors for HOA bindings
//!
//! One ramp engine shared by every host binding (Max, Pure Data, plugin
//! editor) instead of a copy per binding.
//!
//! ## Modules
//! - `ramp` - Linear and angular (shortest-arc) ramped parameter lines
//! - `polar_lines` - Lock-step (radius, azimuth) ramps for N sources
//! - `gain` - Ramped multichannel gain with dB / amplitude / MIDI input
//! - `one_pole` - One-pole low-pass used for air absorption

pub mod ramp;
pub mod polar_lines;
pub mod gain;
pub mod one_pole;

pub use ramp::{AngularRampLine, RampLine, ms_to_samples, samples_to_ms, wrap_two_pi};
pub use polar_lines::MultiSourceRampSet;
pub use gain::MultichannelGain;
pub use one_pole::OnePole;

use hoa_core::Sample;

/// Trait for all DSP processors
pub trait Processor: Send + Sync {
    /// Reset processor state
    fn reset(&mut self);

    /// Get latency in samples
    fn latency(&self) -> usize {
        0
    }
}

/// Mono processor trait
pub trait MonoProcessor: Processor {
    /// Process a single sample
    fn process_sample(&mut self, input: Sample) -> Sample;

    /// Process a block of samples
    fn process_block(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

/// Processor configuration for sample rate changes
pub trait ProcessorConfig {
    fn set_sample_rate(&mut self, sample_rate: f64);
}
