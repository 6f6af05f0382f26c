//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw source rows (`TrainRow`, `FeatureRow`, `StoreRow`)
//! - the canonical merged record (`CanonicalRecord`)
//! - forecast inputs/outputs (`SeriesPoint`, `ForecastPoint`)
//! - insight request/response types (`InsightRequest`, `SanitizedInsight`)

pub mod types;

pub use types::*;
