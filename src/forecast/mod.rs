//! Forecast Engine: per-(store, dept) seasonal forecasts.
//!
//! Responsibilities:
//!
//! - slice a canonical dataset into one ordered weekly series (`SalesSeries`)
//! - fit the yearly-seasonal model and extend it `horizon` weeks (`engine`)
//!
//! The engine re-covers the historical range and appends the forward tail;
//! only the tail is the forecast of interest to downstream consumers.

pub mod engine;

pub use engine::*;

use chrono::NaiveDate;

use crate::domain::{CanonicalRecord, ForecastPoint, SeriesPoint};
use crate::error::AppError;

/// One (store, dept) weekly sales history, strictly ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSeries {
    pub store: u32,
    pub dept: u32,
    points: Vec<SeriesPoint>,
}

impl SalesSeries {
    /// Build a series from explicit points.
    ///
    /// Points are sorted by date; duplicate dates are rejected because two
    /// observations for the same week have no meaning in a weekly series.
    pub fn new(store: u32, dept: u32, mut points: Vec<SeriesPoint>) -> Result<Self, AppError> {
        points.sort_by_key(|p| p.date);
        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(AppError::Usage(format!(
                    "Duplicate timestamp {} in series for store {store}, dept {dept}.",
                    pair[0].date
                )));
            }
        }
        Ok(Self { store, dept, points })
    }

    /// Slice one (store, dept) history out of the canonical dataset.
    ///
    /// The full multi-year history is used; a single year is too short for a
    /// yearly-seasonality model to see a whole cycle.
    pub fn from_canonical(
        records: &[CanonicalRecord],
        store: u32,
        dept: u32,
    ) -> Result<Self, AppError> {
        let points: Vec<SeriesPoint> = records
            .iter()
            .filter(|r| r.store == store && r.dept == dept)
            .map(|r| SeriesPoint {
                date: r.date,
                value: r.weekly_sales,
            })
            .collect();

        if points.is_empty() {
            return Err(AppError::Usage(format!(
                "No rows in the snapshot for store {store}, dept {dept}."
            )));
        }
        Self::new(store, dept, points)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the newest observation.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Output of a forecast run: fitted history followed by the forward tail.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub store: u32,
    pub dept: u32,
    /// Requested number of future weekly periods.
    pub horizon: usize,
    /// Number of historical points the model was fit on.
    pub history_len: usize,
    /// Predictions over the historical dates, then `horizon` future weeks.
    pub points: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// The forward-extending tail: the `horizon` newest predictions.
    pub fn tail(&self) -> &[ForecastPoint] {
        &self.points[self.history_len..]
    }
}
