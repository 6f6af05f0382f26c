//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during merging and forecasting
//! - exported to JSON/CSV
//! - reloaded later by downstream consumers (dashboards, notebooks)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One weekly sales observation from the `train` source.
///
/// Multiple rows per `(store, dept)` key, one per week.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRow {
    pub store: u32,
    pub dept: u32,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub is_holiday: bool,
}

/// Auxiliary covariates from the `features` source.
///
/// Joined on `(store, date, is_holiday)`. All covariates are optional;
/// `NA`/empty cells become `None` and survive the merge as nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub store: u32,
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub temperature: Option<f64>,
    pub fuel_price: Option<f64>,
    pub markdown1: Option<f64>,
    pub markdown2: Option<f64>,
    pub markdown3: Option<f64>,
    pub markdown4: Option<f64>,
    pub markdown5: Option<f64>,
    pub cpi: Option<f64>,
    pub unemployment: Option<f64>,
}

/// Static store metadata from the `stores` source. Joined on `store`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    pub store: u32,
    pub store_type: String,
    pub size: u32,
}

/// One row of the canonical merged dataset.
///
/// Invariants (enforced by the merger):
/// - exactly one row per `(store, dept, date)` triple present in `train`
/// - rows sorted by `(store, dept, date)` ascending
/// - `year`/`month`/`week` are pure functions of `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub store: u32,
    pub dept: u32,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub is_holiday: bool,

    pub temperature: Option<f64>,
    pub fuel_price: Option<f64>,
    pub markdown1: Option<f64>,
    pub markdown2: Option<f64>,
    pub markdown3: Option<f64>,
    pub markdown4: Option<f64>,
    pub markdown5: Option<f64>,
    pub cpi: Option<f64>,
    pub unemployment: Option<f64>,

    pub store_type: Option<String>,
    pub size: Option<u32>,

    pub year: i32,
    pub month: u32,
    /// ISO week number (1..=53).
    pub week: u32,
}

impl CanonicalRecord {
    /// The `(store, dept, date)` sort/uniqueness key.
    pub fn key(&self) -> (u32, u32, NaiveDate) {
        (self.store, self.dept, self.date)
    }
}

/// Derive the calendar fields from a date.
///
/// `year`/`month` are calendar fields; `week` is the ISO week number, so it
/// can disagree with `year` near year boundaries (e.g. 2011-01-01 is ISO week
/// 52 of 2010).
pub fn calendar_fields(date: NaiveDate) -> (i32, u32, u32) {
    (date.year(), date.month(), date.iso_week().week())
}

/// One observed point of a per-(store, dept) sales history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One predicted point of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
}

/// Summary statistics for one `(store, dept, year)` slice, used to build the
/// insight prompt. All values derive read-only from the canonical dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub store: u32,
    pub dept: u32,
    pub year: i32,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
}

/// Normalized, display-safe insight text.
///
/// Produced by the sanitize chain; rendered verbatim by the caller. Not
/// persisted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedInsight {
    pub text: String,
}

impl SanitizedInsight {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_fields_are_pure_functions_of_date() {
        let d = NaiveDate::from_ymd_opt(2011, 11, 25).unwrap();
        assert_eq!(calendar_fields(d), (2011, 11, 47));
    }

    #[test]
    fn iso_week_can_cross_year_boundary() {
        let d = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let (year, month, week) = calendar_fields(d);
        assert_eq!(year, 2011);
        assert_eq!(month, 1);
        assert_eq!(week, 52);
    }
}
