//! Polar and cartesian source positions
//!
//! Azimuth 0 points to the front (positive ordinate) and grows
//! counter-clockwise. The radius is relative to the loudspeaker circle, so
//! radius 1 sits on it.

use std::f64::consts::FRAC_PI_2;

use hoa_dsp::wrap_two_pi;
use serde::{Deserialize, Serialize};

/// Azimuth of the point `(x, y)`, in `[0, 2π)`
#[inline]
pub fn azimuth(abscissa: f64, ordinate: f64) -> f64 {
    wrap_two_pi(ordinate.atan2(abscissa) - FRAC_PI_2)
}

/// Distance of the point `(x, y)` from the centre
#[inline]
pub fn radius(abscissa: f64, ordinate: f64) -> f64 {
    abscissa.hypot(ordinate)
}

#[inline]
pub fn abscissa(radius: f64, azimuth: f64) -> f64 {
    radius * (azimuth + FRAC_PI_2).cos()
}

#[inline]
pub fn ordinate(radius: f64, azimuth: f64) -> f64 {
    radius * (azimuth + FRAC_PI_2).sin()
}

/// Position in the horizontal plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarCoord {
    /// Distance from the centre (1 = on the loudspeaker circle)
    pub radius: f64,
    /// Angle in radians, `[0, 2π)`
    pub azimuth: f64,
}

impl PolarCoord {
    pub fn new(radius: f64, azimuth: f64) -> Self {
        Self {
            radius,
            azimuth: wrap_two_pi(azimuth),
        }
    }

    /// Create from cartesian coordinates
    pub fn from_cartesian(abscissa: f64, ordinate: f64) -> Self {
        Self {
            radius: radius(abscissa, ordinate),
            azimuth: azimuth(abscissa, ordinate),
        }
    }

    pub fn abscissa(&self) -> f64 {
        abscissa(self.radius, self.azimuth)
    }

    pub fn ordinate(&self) -> f64 {
        ordinate(self.radius, self.azimuth)
    }

    /// Convert to `(abscissa, ordinate)`
    pub fn to_cartesian(&self) -> (f64, f64) {
        (self.abscissa(), self.ordinate())
    }
}
