//! Polar ramps for a bank of sources
//!
//! One radius `RampLine` and one azimuth `AngularRampLine` per source, all
//! advanced together once per sample. The per-sample output is a flat frame
//! `[r0 .. r(N-1), a0 .. a(N-1)]`.

use hoa_core::{HoaError, HoaResult, Sample, check_index};

use crate::ramp::{AngularRampLine, RampLine};

/// Lock-step (radius, azimuth) ramps for N sources
#[derive(Debug, Clone)]
pub struct MultiSourceRampSet {
    radius: Vec<RampLine>,
    azimuth: Vec<AngularRampLine>,
    ramp_length: usize,
}

impl MultiSourceRampSet {
    /// Create `number_of_sources` slots resting at radius 0, azimuth 0
    pub fn new(number_of_sources: usize, ramp_length: usize) -> HoaResult<Self> {
        if number_of_sources == 0 {
            return Err(HoaError::InvalidConfiguration(
                "a ramp set needs at least one source".into(),
            ));
        }

        let ramp_length = ramp_length.max(1);
        log::debug!("Ramp set: {number_of_sources} sources, {ramp_length} samples");
        Ok(Self {
            radius: vec![RampLine::new(ramp_length); number_of_sources],
            azimuth: vec![AngularRampLine::new(ramp_length); number_of_sources],
            ramp_length,
        })
    }

    #[inline]
    pub fn number_of_sources(&self) -> usize {
        self.radius.len()
    }

    /// Length of the frame written by [`process`](Self::process)
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.radius.len() * 2
    }

    #[inline]
    pub fn ramp_length(&self) -> usize {
        self.ramp_length
    }

    /// Set the ramp length of every line (clamped to at least one sample)
    pub fn set_ramp_length(&mut self, samples: usize) {
        self.ramp_length = samples.max(1);
        for line in &mut self.radius {
            line.set_ramp_length(self.ramp_length);
        }
        for line in &mut self.azimuth {
            line.set_ramp_length(self.ramp_length);
        }
    }

    /// Ramp source `index` to `radius` (negative radii are clamped to 0)
    pub fn set_radius(&mut self, index: usize, radius: f64) -> HoaResult<()> {
        check_index(index, self.radius.len())?;
        self.radius[index].set_target(clamp_radius(radius));
        Ok(())
    }

    /// Ramp source `index` to `azimuth` along the shorter arc
    pub fn set_azimuth(&mut self, index: usize, azimuth: f64) -> HoaResult<()> {
        check_index(index, self.azimuth.len())?;
        self.azimuth[index].set_target(azimuth);
        Ok(())
    }

    pub fn set_radius_direct(&mut self, index: usize, radius: f64) -> HoaResult<()> {
        check_index(index, self.radius.len())?;
        self.radius[index].set_target_direct(clamp_radius(radius));
        Ok(())
    }

    pub fn set_azimuth_direct(&mut self, index: usize, azimuth: f64) -> HoaResult<()> {
        check_index(index, self.azimuth.len())?;
        self.azimuth[index].set_target_direct(azimuth);
        Ok(())
    }

    /// Jump every source to the same position
    pub fn reset_to(&mut self, radius: f64, azimuth: f64) {
        let radius = clamp_radius(radius);
        for line in &mut self.radius {
            line.set_target_direct(radius);
        }
        for line in &mut self.azimuth {
            line.set_target_direct(azimuth);
        }
    }

    /// Current radius of source `index`
    pub fn radius(&self, index: usize) -> Option<f64> {
        self.radius.get(index).map(RampLine::current)
    }

    /// Current azimuth of source `index`
    pub fn azimuth(&self, index: usize) -> Option<f64> {
        self.azimuth.get(index).map(AngularRampLine::current)
    }

    pub fn target_radius(&self, index: usize) -> Option<f64> {
        self.radius.get(index).map(RampLine::target)
    }

    pub fn target_azimuth(&self, index: usize) -> Option<f64> {
        self.azimuth.get(index).map(AngularRampLine::target)
    }

    /// True while any line is still ramping
    pub fn is_ramping(&self) -> bool {
        self.radius.iter().any(RampLine::is_ramping)
            || self.azimuth.iter().any(AngularRampLine::is_ramping)
    }

    /// Advance every line by one sample.
    ///
    /// All radii are advanced first, then all azimuths. Values are written to
    /// `frame` as `[radii.., azimuths..]`; every line advances even if `frame`
    /// is shorter than [`frame_len`](Self::frame_len).
    #[inline]
    pub fn process(&mut self, frame: &mut [Sample]) {
        let n = self.radius.len();

        for (index, line) in self.radius.iter_mut().enumerate() {
            let value = line.advance();
            if let Some(slot) = frame.get_mut(index) {
                *slot = value;
            }
        }
        for (index, line) in self.azimuth.iter_mut().enumerate() {
            let value = line.advance();
            if let Some(slot) = frame.get_mut(n + index) {
                *slot = value;
            }
        }
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if radius.is_nan() || radius < 0.0 {
        log::warn!("Radius {radius} clamped to 0");
        0.0
    } else {
        radius
    }
}
