//! Error types for the DSP layer

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoaError {
    /// Slot index outside `[0, len)`
    #[error("Index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
}

/// Result type alias
pub type HoaResult<T> = Result<T, HoaError>;

/// Check `index < len`, returning [`HoaError::OutOfRange`] otherwise.
#[inline]
pub fn check_index(index: usize, len: usize) -> HoaResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(HoaError::OutOfRange { index, len })
    }
}
