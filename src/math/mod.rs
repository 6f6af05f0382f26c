//! Mathematical utilities: seasonal design rows and least squares.

pub mod ols;
pub mod seasonal;

pub use ols::*;
pub use seasonal::*;
