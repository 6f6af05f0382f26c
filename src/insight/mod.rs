//! Insight Generator: prompt build -> external generation -> sanitize.
//!
//! The flow is a straight line through four states: a request is derived
//! read-only from the canonical dataset, turned into a prompt, pushed through
//! the external process under a timeout, and the raw response is normalized
//! into display-safe text. Every failure surfaces as one of the typed
//! insight errors; nothing is retried.

pub mod generate;
pub mod prompt;
pub mod sanitize;

pub use generate::*;
pub use prompt::*;
pub use sanitize::*;

use std::time::Duration;

use crate::domain::{CanonicalRecord, InsightRequest, SanitizedInsight};
use crate::error::AppError;

/// Derive the summary statistics for one (store, dept, year) slice.
pub fn build_request(
    records: &[CanonicalRecord],
    store: u32,
    dept: u32,
    year: i32,
) -> Result<InsightRequest, AppError> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut maximum = f64::NEG_INFINITY;
    let mut minimum = f64::INFINITY;

    for r in records {
        if r.store == store && r.dept == dept && r.year == year {
            count += 1;
            sum += r.weekly_sales;
            maximum = maximum.max(r.weekly_sales);
            minimum = minimum.min(r.weekly_sales);
        }
    }

    if count == 0 {
        return Err(AppError::Usage(format!(
            "No rows in the snapshot for store {store}, dept {dept}, year {year}."
        )));
    }

    Ok(InsightRequest {
        store,
        dept,
        year,
        average: sum / count as f64,
        maximum,
        minimum,
    })
}

/// Run the full insight flow for one slice.
pub fn run_insight(
    records: &[CanonicalRecord],
    store: u32,
    dept: u32,
    year: i32,
    generator: &dyn TextGenerator,
    timeout: Duration,
) -> Result<SanitizedInsight, AppError> {
    let request = build_request(records, store, dept, year)?;
    let prompt = build_prompt(&request);
    let raw = generator.generate(&prompt, timeout)?;
    Ok(sanitize(&raw))
}
