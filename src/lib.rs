//! `gr-bvalue` library crate.
//!
//! Gutenberg-Richter b-value estimation: magnitude filtering, frequency-magnitude
//! distributions, Maximum-Curvature completeness, and maximum-likelihood plus
//! least-squares fits of `log10 N = a - b M`.
//!
//! The binary (`bvalue`) is a thin wrapper around this library so that the
//! estimation core is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod fmd;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
