//! Sample types and harmonic frame helpers

/// Type alias for audio samples (always f64 for maximum precision)
pub type Sample = f64;

/// Add `source` into `dest` element-wise.
///
/// Only the overlapping prefix of the two slices is touched.
#[inline]
pub fn add_into(source: &[Sample], dest: &mut [Sample]) {
    for (d, &s) in dest.iter_mut().zip(source) {
        *d += s;
    }
}
