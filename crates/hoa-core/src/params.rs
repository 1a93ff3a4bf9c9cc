//! Parameter types for gain stages

use serde::{Deserialize, Serialize};

/// Level (dB) at and below which a gain stage is fully closed
pub const SILENCE_DB: f64 = -70.0;

/// Convert decibels to linear amplitude.
///
/// Anything at or below [`SILENCE_DB`] maps to exactly `0.0`.
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    if db > SILENCE_DB {
        10.0_f64.powf(db / 20.0)
    } else {
        0.0
    }
}

/// Convert linear amplitude to decibels (`-inf` for 0).
#[inline]
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.abs().log10()
}

/// Linear rescale of `value` from `[in_min, in_max]` to `[out_min, out_max]`
#[inline]
pub fn scale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// How incoming gain values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GainInputMode {
    /// Value is a level in dB
    #[default]
    Decibels,
    /// Value is a linear amplitude factor
    Amplitude,
    /// Value is a MIDI-style 0..128 fader position (0 = -70 dB, 128 = 0 dB)
    Midi,
}

impl GainInputMode {
    /// Convert a value expressed in this mode into dB
    pub fn to_db(self, value: f64) -> f64 {
        match self {
            GainInputMode::Decibels => value,
            GainInputMode::Amplitude => amplitude_to_db(value),
            GainInputMode::Midi => scale(value, 0.0, 128.0, SILENCE_DB, 0.0),
        }
    }

    /// Express a dB level in this mode
    pub fn from_db(self, db: f64) -> f64 {
        match self {
            GainInputMode::Decibels => db,
            GainInputMode::Amplitude => db_to_amplitude(db),
            GainInputMode::Midi => scale(db, SILENCE_DB, 0.0, 0.0, 128.0),
        }
    }
}

/// dB range a gain stage is constrained to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DbRange {
    pub min: f64,
    pub max: f64,
}

impl DbRange {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Clamp a dB value into the range; NaN collapses to `min`
    #[inline]
    pub fn constrain(&self, db: f64) -> f64 {
        if db.is_nan() {
            self.min
        } else {
            db.clamp(self.min, self.max)
        }
    }
}

impl Default for DbRange {
    fn default() -> Self {
        Self::new(SILENCE_DB, 18.0)
    }
}
