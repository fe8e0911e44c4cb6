//! Gutenberg-Richter law evaluation.
//!
//! The law is kept as small, pure functions so that the fitting code and the
//! plotting code evaluate curves the same way.

pub mod law;

pub use law::*;
