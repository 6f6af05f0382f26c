//! `sales-lens` library crate.
//!
//! The binary (`slens`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., a future dashboard backend or notebooks)
//! - code stays easy to navigate as the project grows
//!
//! The pipeline is: raw CSVs -> merge -> canonical snapshot -> (validate,
//! forecast, insight). The snapshot is the single artifact every downstream
//! consumer reads.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod insight;
pub mod io;
pub mod math;
pub mod merge;
pub mod report;
pub mod validate;
