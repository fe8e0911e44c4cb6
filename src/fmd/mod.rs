//! Frequency-magnitude distribution construction.
//!
//! Responsibilities:
//!
//! - select magnitudes within the accepted range (`filter`)
//! - bin them and build the cumulative FMD (`builder`)
//! - estimate a completeness magnitude from the FMD's curvature (`curvature`)

pub mod builder;
pub mod curvature;
pub mod filter;

pub use builder::*;
pub use curvature::*;
pub use filter::*;
