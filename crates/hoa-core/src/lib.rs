//! hoa-core: Shared types for the HOA encoding engine
//!
//! Foundational pieces used by `hoa-dsp` and `hoa-spatial`:
//! the sample type, the DSP-level error type and the gain parameter modes
//! shared by every host binding.

mod sample;
mod params;
mod error;

pub use sample::*;
pub use params::*;
pub use error::*;
