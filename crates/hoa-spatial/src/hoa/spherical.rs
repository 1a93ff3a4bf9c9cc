//! 3D spherical harmonics (ACN ordering, SN3D normalization)

use super::HarmonicBasis;
use crate::error::{SpatialError, SpatialResult};

/// Highest order with closed-form harmonics
pub const MAX_SPHERICAL_ORDER: usize = 3;

/// ACN channel index from (degree, index within degree)
#[inline]
pub fn acn_index(degree: i32, m: i32) -> usize {
    (degree * degree + degree + m) as usize
}

/// (degree, m) of an ACN index
#[inline]
pub fn acn_to_degree_m(acn: usize) -> (i32, i32) {
    let degree = (acn as f64).sqrt().floor() as i32;
    let m = acn as i32 - degree * degree - degree;
    (degree, m)
}

/// Spherical harmonics for sources at a fixed elevation.
///
/// Sources are driven by azimuth only; the elevation defaults to the
/// horizontal plane.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalHarmonics {
    order: usize,
    /// Elevation in radians
    elevation: f64,
    sin_el: f64,
    cos_el: f64,
}

impl SphericalHarmonics {
    pub fn new(order: usize) -> SpatialResult<Self> {
        if order > MAX_SPHERICAL_ORDER {
            return Err(SpatialError::InvalidAmbisonicOrder(order));
        }
        Ok(Self {
            order,
            elevation: 0.0,
            sin_el: 0.0,
            cos_el: 1.0,
        })
    }

    /// Set the elevation shared by every source, in radians
    pub fn set_elevation(&mut self, elevation: f64) {
        self.elevation = elevation;
        self.sin_el = elevation.sin();
        self.cos_el = elevation.cos();
    }

    #[inline]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}

impl HarmonicBasis for SphericalHarmonics {
    #[inline]
    fn order(&self) -> usize {
        self.order
    }

    #[inline]
    fn number_of_harmonics(&self) -> usize {
        (self.order + 1) * (self.order + 1)
    }

    #[inline]
    fn harmonic_degree(&self, index: usize) -> usize {
        acn_to_degree_m(index).0 as usize
    }

    fn harmonic_name(&self, index: usize) -> Option<String> {
        if index >= self.number_of_harmonics() {
            return None;
        }
        let (degree, m) = acn_to_degree_m(index);
        Some(format!("Harmonic {degree} {m}"))
    }

    fn harmonic(&self, index: usize, azimuth: f64) -> f64 {
        let (sin_el, cos_el) = (self.sin_el, self.cos_el);
        let az = azimuth;

        match index {
            0 => 1.0,
            // Order 1
            1 => cos_el * az.sin(),
            2 => sin_el,
            3 => cos_el * az.cos(),
            // Order 2
            4 => 0.8660254037844386 * cos_el * cos_el * (2.0 * az).sin(),
            5 => 1.7320508075688772 * sin_el * cos_el * az.sin(),
            6 => 0.5 * (3.0 * sin_el * sin_el - 1.0),
            7 => 1.7320508075688772 * sin_el * cos_el * az.cos(),
            8 => 0.8660254037844386 * cos_el * cos_el * (2.0 * az).cos(),
            // Order 3
            9 => 0.7905694150420949 * cos_el * cos_el * cos_el * (3.0 * az).sin(),
            10 => 1.9364916731037085 * sin_el * cos_el * cos_el * (2.0 * az).sin(),
            11 => 0.6123724356957945 * cos_el * (5.0 * sin_el * sin_el - 1.0) * az.sin(),
            12 => 0.5 * sin_el * (5.0 * sin_el * sin_el - 3.0),
            13 => 0.6123724356957945 * cos_el * (5.0 * sin_el * sin_el - 1.0) * az.cos(),
            14 => 1.9364916731037085 * sin_el * cos_el * cos_el * (2.0 * az).cos(),
            15 => 0.7905694150420949 * cos_el * cos_el * cos_el * (3.0 * az).cos(),
            _ => 0.0,
        }
    }
}
