//! Ramped parameter lines
//!
//! Click-free control changes for the audio thread:
//! - `RampLine` - linear ramp over a fixed number of samples
//! - `AngularRampLine` - same ramp on the circle, always along the shorter arc
//!
//! # Contract
//! `advance()` is called exactly once per output sample. The ramp length is
//! counted in samples, so calling it more or less often than that drifts the
//! ramp away from real time. A new target redirects a ramp in flight from
//! wherever it currently is.

use std::f64::consts::{PI, TAU};

use hoa_core::Sample;

/// Wrap an angle into `[0, 2π)`
#[inline]
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert a ramp time in milliseconds to a ramp length in samples.
///
/// The result is truncated and never below 1, so zero, negative or NaN times
/// all give a one-sample ramp.
#[inline]
pub fn ms_to_samples(ms: f64, sample_rate: f64) -> usize {
    let samples = ms * sample_rate / 1000.0;
    if samples >= 1.0 { samples as usize } else { 1 }
}

/// Convert a ramp length in samples to milliseconds
#[inline]
pub fn samples_to_ms(samples: usize, sample_rate: f64) -> f64 {
    samples as f64 / sample_rate * 1000.0
}

// ============ Linear Ramp ============

/// Linear ramp towards a target value
#[derive(Debug, Clone, PartialEq)]
pub struct RampLine {
    /// Value emitted by the last `advance()`
    current: f64,
    /// Value the ramp ends on
    target: f64,
    /// Increment per sample
    step: f64,
    /// Samples since the target was set
    elapsed: usize,
    /// Ramp duration in samples (always >= 1)
    length: usize,
}

impl RampLine {
    /// Create a ramp resting at 0
    pub fn new(length: usize) -> Self {
        Self::with_value(0.0, length)
    }

    /// Create a ramp resting at `value`
    pub fn with_value(value: f64, length: usize) -> Self {
        Self {
            current: value,
            target: value,
            step: 0.0,
            elapsed: 0,
            length: length.max(1),
        }
    }

    /// Set the ramp duration in samples, clamped to at least one sample.
    ///
    /// A ramp already in flight keeps its step: only the completion point
    /// moves.
    pub fn set_ramp_length(&mut self, samples: usize) {
        self.length = samples.max(1);
    }

    #[inline]
    pub fn ramp_length(&self) -> usize {
        self.length
    }

    /// Jump to `value` immediately
    pub fn set_target_direct(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.elapsed = 0;
    }

    /// Start a ramp from the current value to `value`
    pub fn set_target(&mut self, value: f64) {
        self.target = value;
        self.step = (self.target - self.current) / self.length as f64;
        self.elapsed = 0;
    }

    /// Advance by one sample and return the new value
    #[inline]
    pub fn advance(&mut self) -> f64 {
        self.current += self.step;
        self.elapsed += 1;
        if self.elapsed >= self.length {
            self.current = self.target;
            self.step = 0.0;
            self.elapsed = 0;
        }
        self.current
    }

    /// Advance once per slot of `buffer`, writing each value
    pub fn fill(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.advance();
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn elapsed(&self) -> usize {
        self.elapsed
    }

    /// True while a ramp is in flight
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.step != 0.0
    }
}

impl Default for RampLine {
    fn default() -> Self {
        Self::new(1)
    }
}

// ============ Angular Ramp ============

/// Ramp for angles in radians.
///
/// Values live in `[0, 2π)`. A new target is reached along the shorter arc,
/// so a pan from 350° to 10° moves through 0° instead of sweeping back
/// through 180°.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngularRampLine {
    line: RampLine,
}

impl AngularRampLine {
    /// Create a ramp resting at 0 rad
    pub fn new(length: usize) -> Self {
        Self {
            line: RampLine::new(length),
        }
    }

    /// Create a ramp resting at `angle` (wrapped, 0 if not finite)
    pub fn with_angle(angle: f64, length: usize) -> Self {
        let angle = if angle.is_finite() { wrap_two_pi(angle) } else { 0.0 };
        Self {
            line: RampLine::with_value(angle, length),
        }
    }

    pub fn set_ramp_length(&mut self, samples: usize) {
        self.line.set_ramp_length(samples);
    }

    #[inline]
    pub fn ramp_length(&self) -> usize {
        self.line.ramp_length()
    }

    /// Jump to `angle` immediately. Non-finite angles are ignored.
    pub fn set_target_direct(&mut self, angle: f64) {
        if angle.is_finite() {
            self.line.set_target_direct(wrap_two_pi(angle));
        }
    }

    /// Start a ramp to `angle` along the shorter arc. Non-finite angles are
    /// ignored.
    pub fn set_target(&mut self, angle: f64) {
        if !angle.is_finite() {
            return;
        }
        let target = wrap_two_pi(angle);
        let current = wrap_two_pi(self.line.current);
        let distance = (current - target).abs();

        let span = if distance <= PI {
            target - current
        } else if target > current {
            (target - TAU) - current
        } else {
            (target + TAU) - current
        };

        self.line.current = current;
        self.line.target = target;
        self.line.step = span / self.line.length as f64;
        self.line.elapsed = 0;
    }

    /// Advance by one sample and return the new angle in `[0, 2π)`
    #[inline]
    pub fn advance(&mut self) -> f64 {
        let value = wrap_two_pi(self.line.advance());
        self.line.current = value;
        value
    }

    pub fn fill(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.advance();
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.line.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.line.target
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.line.step
    }

    #[inline]
    pub fn elapsed(&self) -> usize {
        self.line.elapsed
    }

    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.line.is_ramping()
    }
}

// ============ Tests ============
