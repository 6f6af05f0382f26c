//! Synthetic data generation.
//!
//! Lets the tool run end to end (merge -> validate -> forecast -> insight)
//! without the real retail CSVs.

pub mod sample;

pub use sample::*;
