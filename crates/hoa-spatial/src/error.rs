//! Error types for the encoder

use hoa_core::HoaError;
use thiserror::Error;

/// Encoder error types
#[derive(Error, Debug)]
pub enum SpatialError {
    /// Order, source count, sample rate or block size not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Order not supported by the requested basis
    #[error("Invalid Ambisonic order: {0} (max supported: 3 for spherical)")]
    InvalidAmbisonicOrder(usize),

    #[error("Source {index} out of range ({count} sources)")]
    SourceOutOfRange { index: usize, count: usize },

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },

    /// Control command dropped because the queue is full
    #[error("Control queue full")]
    ControlQueueFull,

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Dsp(#[from] HoaError),
}

/// Result type for encoder operations
pub type SpatialResult<T> = Result<T, SpatialError>;
