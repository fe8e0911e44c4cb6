//! Input/output helpers.
//!
//! - catalogue ingest (`catalogue`)
//! - FMD table export to CSV (`export`)
//! - results JSON read/write (`results`)

pub mod catalogue;
pub mod export;
pub mod results;

pub use catalogue::*;
pub use export::*;
pub use results::*;
