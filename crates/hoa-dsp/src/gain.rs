//! Ramped multichannel gain
//!
//! One gain ramp applied to every channel of an ambisonic bus, so all
//! harmonics move together. Values can be given in dB, as a linear amplitude
//! or as a 0..128 fader position.

use hoa_core::{DbRange, GainInputMode, Sample, db_to_amplitude};

use crate::ramp::{RampLine, ms_to_samples};
use crate::{Processor, ProcessorConfig};

/// Gain stage shared by all channels of a bus
#[derive(Debug, Clone)]
pub struct MultichannelGain {
    /// Linear amplitude ramp
    line: RampLine,
    /// Number of channels processed
    channels: usize,
    /// How `set_value` interprets its argument
    input_mode: GainInputMode,
    /// Allowed dB range
    range: DbRange,
    /// Last requested level in dB (after range constraint)
    db: f64,
    ramp_ms: f64,
    sample_rate: f64,
}

impl MultichannelGain {
    /// Create a unity-gain stage
    pub fn new(channels: usize, ramp_ms: f64, sample_rate: f64) -> Self {
        let ramp_ms = ramp_ms.max(0.0);
        Self {
            line: RampLine::with_value(1.0, ms_to_samples(ramp_ms, sample_rate)),
            channels,
            input_mode: GainInputMode::Decibels,
            range: DbRange::default(),
            db: 0.0,
            ramp_ms,
            sample_rate,
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn set_channels(&mut self, channels: usize) {
        self.channels = channels;
    }

    pub fn set_input_mode(&mut self, mode: GainInputMode) {
        self.input_mode = mode;
    }

    #[inline]
    pub fn input_mode(&self) -> GainInputMode {
        self.input_mode
    }

    /// Change the dB range; the current level is constrained and re-targeted
    pub fn set_range(&mut self, range: DbRange) {
        log::debug!("Gain range set to [{}, {}] dB", range.min, range.max);
        self.range = range;
        self.set_db(self.db);
    }

    #[inline]
    pub fn range(&self) -> DbRange {
        self.range
    }

    /// Ramp to `value`, interpreted in the current input mode
    pub fn set_value(&mut self, value: f64) {
        self.set_db(self.input_mode.to_db(value));
    }

    /// Jump to `value`, interpreted in the current input mode
    pub fn set_value_direct(&mut self, value: f64) {
        self.db = self.range.constrain(self.input_mode.to_db(value));
        self.line.set_target_direct(db_to_amplitude(self.db));
    }

    /// Ramp to a level in dB
    pub fn set_db(&mut self, db: f64) {
        self.db = self.range.constrain(db);
        self.line.set_target(db_to_amplitude(self.db));
    }

    /// Requested level, expressed in the current input mode
    pub fn value(&self) -> f64 {
        self.input_mode.from_db(self.db)
    }

    #[inline]
    pub fn db(&self) -> f64 {
        self.db
    }

    /// Amplitude currently applied (mid-ramp value)
    #[inline]
    pub fn amplitude(&self) -> f64 {
        self.line.current()
    }

    /// Set the ramp time in milliseconds (negative clamps to 0)
    pub fn set_ramp_ms(&mut self, ms: f64) {
        self.ramp_ms = ms.max(0.0);
        self.line
            .set_ramp_length(ms_to_samples(self.ramp_ms, self.sample_rate));
    }

    #[inline]
    pub fn ramp_ms(&self) -> f64 {
        self.ramp_ms
    }

    /// Apply the gain from `inputs` to `outputs`.
    ///
    /// The ramp advances once per frame; frames beyond the shortest channel
    /// and channels beyond [`channels`](Self::channels) are left untouched.
    pub fn process_block(&mut self, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]) {
        let channels = self.channels.min(inputs.len()).min(outputs.len());
        let frames = inputs[..channels]
            .iter()
            .map(|c| c.len())
            .chain(outputs[..channels].iter().map(|c| c.len()))
            .min()
            .unwrap_or(0);

        for i in 0..frames {
            let gain = self.line.advance();
            for ch in 0..channels {
                outputs[ch][i] = gain * inputs[ch][i];
            }
        }
    }

    /// Apply the gain in place
    pub fn process_in_place(&mut self, buffers: &mut [&mut [Sample]]) {
        let channels = self.channels.min(buffers.len());
        let frames = buffers[..channels].iter().map(|c| c.len()).min().unwrap_or(0);

        for i in 0..frames {
            let gain = self.line.advance();
            for buffer in buffers[..channels].iter_mut() {
                buffer[i] *= gain;
            }
        }
    }
}

impl Processor for MultichannelGain {
    /// Finish any ramp in flight
    fn reset(&mut self) {
        let target = self.line.target();
        self.line.set_target_direct(target);
    }
}

impl ProcessorConfig for MultichannelGain {
    /// Keeps the ramp duration in ms and re-derives its length in samples
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.line
            .set_ramp_length(ms_to_samples(self.ramp_ms, self.sample_rate));
    }
}
