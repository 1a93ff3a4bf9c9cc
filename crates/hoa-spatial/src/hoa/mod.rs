//! Harmonic bases and widening
//!
//! A basis turns a mono signal and an azimuth into one value per harmonic.
//! Two bases are provided:
//! - `CircularHarmonics` - 2D, `2·order + 1` harmonics
//! - `SphericalHarmonics` - 3D ACN/SN3D, `(order + 1)²` harmonics, orders 0-3
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hoa_spatial::hoa::{CircularHarmonics, HarmonicBasis};
//!
//! let basis = CircularHarmonics::new(3);
//! let mut harmonics = vec![0.0; basis.number_of_harmonics()];
//! basis.encode(1.0, std::f64::consts::FRAC_PI_2, &mut harmonics);
//! ```

mod circular;
mod spherical;
mod wider;

pub use circular::CircularHarmonics;
pub use spherical::{MAX_SPHERICAL_ORDER, SphericalHarmonics, acn_index, acn_to_degree_m};
pub use wider::Wider;

use hoa_core::Sample;

use crate::config::Dimension;
use crate::error::SpatialResult;

/// Projection of a signal onto a set of harmonics
pub trait HarmonicBasis: Send + Sync {
    /// Decomposition order
    fn order(&self) -> usize;

    fn number_of_harmonics(&self) -> usize;

    /// Degree (order band) of harmonic `index`
    fn harmonic_degree(&self, index: usize) -> usize;

    /// Display name of harmonic `index`, `None` when out of range
    fn harmonic_name(&self, index: usize) -> Option<String>;

    /// Value of harmonic `index` for a source at `azimuth`
    fn harmonic(&self, index: usize, azimuth: f64) -> f64;

    /// Encode one sample: `out[h] = signal * harmonic(h, azimuth)`
    fn encode(&self, signal: Sample, azimuth: f64, out: &mut [Sample]) {
        for (index, value) in out.iter_mut().take(self.number_of_harmonics()).enumerate() {
            *value = signal * self.harmonic(index, azimuth);
        }
    }

    /// Encode a block, one azimuth per sample.
    ///
    /// `harmonics[h][t] = signal[t] * harmonic(h, azimuth[t])`. Only the
    /// common length of `signal` and `azimuth` is written.
    fn encode_block(&self, signal: &[Sample], azimuth: &[Sample], harmonics: &mut [Vec<Sample>]) {
        let len = signal.len().min(azimuth.len());
        for (index, channel) in harmonics
            .iter_mut()
            .take(self.number_of_harmonics())
            .enumerate()
        {
            for ((out, &s), &az) in channel.iter_mut().zip(&signal[..len]).zip(&azimuth[..len]) {
                *out = s * self.harmonic(index, az);
            }
        }
    }
}

/// Build the basis for `dimension` at `order`
pub fn basis_for(dimension: Dimension, order: usize) -> SpatialResult<Box<dyn HarmonicBasis>> {
    match dimension {
        Dimension::Circular => Ok(Box::new(CircularHarmonics::new(order))),
        Dimension::Spherical => Ok(Box::new(SphericalHarmonics::new(order)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;

    #[test]
    fn test_basis_factory() {
        let basis = basis_for(Dimension::Circular, 5).unwrap();
        assert_eq!(basis.number_of_harmonics(), 11);

        let basis = basis_for(Dimension::Spherical, 2).unwrap();
        assert_eq!(basis.number_of_harmonics(), 9);

        assert!(matches!(
            basis_for(Dimension::Spherical, 4),
            Err(SpatialError::InvalidAmbisonicOrder(4))
        ));
    }

    #[test]
    fn test_block_matches_scalar() {
        let basis = CircularHarmonics::new(3);
        let signal = [0.5, -1.0, 0.25, 1.0];
        let azimuth = [0.0, 1.0, 2.5, 6.0];
        let mut block = vec![vec![0.0; 4]; 7];
        basis.encode_block(&signal, &azimuth, &mut block);

        let mut frame = [0.0; 7];
        for t in 0..4 {
            basis.encode(signal[t], azimuth[t], &mut frame);
            for h in 0..7 {
                assert_eq!(block[h][t], frame[h]);
            }
        }
    }
}
