//! Terminal reporting: run summary, FMD table and per-Mc fit blocks.

pub mod format;

pub use format::*;
