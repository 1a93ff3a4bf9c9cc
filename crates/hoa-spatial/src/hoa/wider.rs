//! Widening
//!
//! Sources inside the loudspeaker circle are spread by fading out the higher
//! harmonic degrees. At the centre only the omnidirectional component
//! remains.

use hoa_core::Sample;

use super::HarmonicBasis;

/// Degree-dependent widening weights
#[derive(Debug, Clone)]
pub struct Wider {
    order: usize,
    /// Degree of each harmonic
    degrees: Vec<usize>,
}

impl Wider {
    /// Create a wider matching the harmonic layout of `basis`
    pub fn new(basis: &dyn HarmonicBasis) -> Self {
        Self {
            order: basis.order(),
            degrees: (0..basis.number_of_harmonics())
                .map(|i| basis.harmonic_degree(i))
                .collect(),
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn number_of_harmonics(&self) -> usize {
        self.degrees.len()
    }

    /// Weight of a harmonic of `degree` for a widening `factor` in `[0, 1]`
    #[inline]
    pub fn weight(&self, degree: usize, factor: f64) -> f64 {
        let factor = factor.clamp(0.0, 1.0);
        (1.0 + (self.order + 1) as f64 * factor - degree as f64).clamp(0.0, 1.0)
    }

    /// Widen one frame of harmonics for a source at `radius`.
    ///
    /// Radius 1 and beyond leaves the harmonics untouched.
    #[inline]
    pub fn process(&self, harmonics: &mut [Sample], radius: f64) {
        if radius < 1.0 {
            self.process_with_factor(harmonics, radius);
        }
    }

    /// Widen one frame with an explicit factor (0 = omni only, 1 = untouched)
    pub fn process_with_factor(&self, harmonics: &mut [Sample], factor: f64) {
        for (value, &degree) in harmonics.iter_mut().zip(&self.degrees) {
            *value *= self.weight(degree, factor);
        }
    }

    /// Widen a block, one radius per sample
    pub fn process_block(&self, harmonics: &mut [Vec<Sample>], radius: &[Sample]) {
        for (channel, &degree) in harmonics.iter_mut().zip(&self.degrees) {
            for (value, &r) in channel.iter_mut().zip(radius) {
                if r < 1.0 {
                    *value *= self.weight(degree, r);
                }
            }
        }
    }
}
