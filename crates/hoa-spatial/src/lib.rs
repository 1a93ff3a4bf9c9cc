//! hoa-spatial: Multi-source HOA encoding
//!
//! Encodes N mono sources into a circular (2D) or spherical (3D) harmonic
//! bus. Each source is positioned in polar coordinates whose changes are
//! ramped sample by sample:
//!
//! ## Encoder
//! - Inverse-square distance gain beyond the loudspeaker circle
//! - Widening of sources inside the circle
//! - Optional air absorption for distant sources
//! - Frame and block processing, overwrite or accumulate
//! - Signal-rate radius / azimuth control
//!
//! ## Control
//! - Direct calls from the audio thread
//! - Lock-free command queue from any other thread
//!
//! ```rust,ignore
//! use hoa_spatial::{DistanceGainEncoder, EncoderConfig};
//!
//! let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(3, 2, 48000.0, 50.0))?;
//! let mut control = encoder.take_control().unwrap();
//! control.set_polar(1, 2.0, std::f64::consts::FRAC_PI_2)?;
//! encoder.process_block(&inputs, &mut outputs)?;
//! ```

pub mod air;
pub mod config;
pub mod control;
pub mod encoder;
pub mod hoa;
pub mod position;

mod error;

pub use air::{AirAbsorption, air_cutoff};
pub use config::{Dimension, EncoderConfig};
pub use control::{ControlCommand, EncoderControl, Transition};
pub use encoder::{DistanceGainEncoder, distance_gain};
pub use error::{SpatialError, SpatialResult};
pub use hoa::{CircularHarmonics, HarmonicBasis, SphericalHarmonics, Wider};
pub use position::PolarCoord;
