//! Terminal reporting utilities.

pub mod format;

pub use format::*;
