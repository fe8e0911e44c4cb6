//! Mathematical utilities: numerical gradient, grids, and least squares.

pub mod gradient;
pub mod grid;
pub mod ols;

pub use gradient::*;
pub use grid::*;
pub use ols::*;
