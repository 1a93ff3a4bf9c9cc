//! 2D circular harmonics

use super::HarmonicBasis;

/// Circular harmonics of a given order.
///
/// Index 0 is the omnidirectional component; index `2k - 1` is `sin(kθ)`
/// and `2k` is `cos(kθ)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularHarmonics {
    order: usize,
}

impl CircularHarmonics {
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Signed argument `±k` of harmonic `index`
    #[inline]
    pub fn harmonic_argument(index: usize) -> i64 {
        let k = index.div_ceil(2) as i64;
        if index % 2 == 1 { -k } else { k }
    }
}

impl HarmonicBasis for CircularHarmonics {
    #[inline]
    fn order(&self) -> usize {
        self.order
    }

    #[inline]
    fn number_of_harmonics(&self) -> usize {
        2 * self.order + 1
    }

    #[inline]
    fn harmonic_degree(&self, index: usize) -> usize {
        index.div_ceil(2)
    }

    fn harmonic_name(&self, index: usize) -> Option<String> {
        (index < self.number_of_harmonics())
            .then(|| format!("Harmonic {}", Self::harmonic_argument(index)))
    }

    #[inline]
    fn harmonic(&self, index: usize, azimuth: f64) -> f64 {
        if index == 0 {
            return 1.0;
        }
        let k = index.div_ceil(2) as f64;
        if index % 2 == 1 {
            (k * azimuth).sin()
        } else {
            (k * azimuth).cos()
        }
    }
}
