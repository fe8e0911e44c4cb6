//! Gutenberg-Richter law fitting.
//!
//! Responsibilities:
//!
//! - maximum-likelihood a/b estimate (`mle`)
//! - least-squares line fit with standard errors (`regression`)
//! - per-Mc selection, filtering and prediction bands (`fitter`)
//! - completeness set assembly and the parallel per-Mc loop (`orchestrator`)

pub mod fitter;
pub mod mle;
pub mod orchestrator;
pub mod regression;

pub use fitter::*;
pub use mle::*;
pub use orchestrator::*;
pub use regression::*;
