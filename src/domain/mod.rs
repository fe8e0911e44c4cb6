//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration records (`EstimationConfig`, `RunConfig`, `BinSpec`, `YLim`)
//! - distribution types (`MagnitudeSeries`, `Histogram`, `Fmd`, `CurvatureCurve`)
//! - fit outputs (`FitResult`, `PredictionBand`, `McOutcome`)

pub mod types;

pub use types::*;
