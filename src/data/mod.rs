//! Data sources that are not catalogue files.

pub mod synthetic;

pub use synthetic::*;
