//! Seasonal fit + predict.
//!
//! Given one ordered weekly series, we:
//!
//! - build the trend + yearly-harmonic design matrix (`math::seasonal`)
//! - solve the least squares problem once (`math::ols`)
//! - predict over the historical dates plus `horizon` future weekly steps
//!
//! The model family captures level, drift, and yearly shape; it is a
//! deliberate black box to callers, who only see `(date, predicted)` pairs.
//! Predictions are approximate — consumers must not expect bit-for-bit
//! reproducibility across environments, and tests compare with tolerances.

use chrono::Duration;
use nalgebra::{DMatrix, DVector};

use crate::domain::ForecastPoint;
use crate::error::AppError;
use crate::forecast::{ForecastResult, SalesSeries};
use crate::math::{fill_design_row, harmonic_count, param_count, predict, solve_least_squares, DAYS_PER_YEAR};

/// Minimum history length for the seasonal fit.
///
/// Below this the design matrix for even a single harmonic is too thin to
/// pin down a stable shape.
pub const MIN_HISTORY: usize = 12;

/// Fit the seasonal model and extend the series by `horizon` weekly periods.
pub fn forecast(series: &SalesSeries, horizon: usize) -> Result<ForecastResult, AppError> {
    if horizon == 0 {
        return Err(AppError::Usage(
            "Forecast horizon must be at least 1 week.".to_string(),
        ));
    }

    let points = series.points();
    let n = points.len();
    if n < MIN_HISTORY {
        return Err(AppError::InsufficientHistory {
            needed: MIN_HISTORY,
            got: n,
        });
    }

    let origin = points[0].date;
    let harmonics = harmonic_count(n);
    let p = param_count(harmonics);

    let mut x = DMatrix::<f64>::zeros(n, p);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = vec![0.0; p];
    for (i, point) in points.iter().enumerate() {
        if !point.value.is_finite() {
            return Err(AppError::Fit(format!(
                "non-finite observation at {}",
                point.date
            )));
        }
        let t = (point.date - origin).num_days() as f64 / DAYS_PER_YEAR;
        fill_design_row(t, harmonics, &mut row);
        for j in 0..p {
            x[(i, j)] = row[j];
        }
        y[i] = point.value;
    }

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::Fit(format!(
            "least squares solve failed for store {}, dept {}",
            series.store, series.dept
        ))
    })?;
    let beta: Vec<f64> = beta.iter().copied().collect();

    // Re-cover the historical range, then extend by `horizon` weekly steps
    // immediately following the last observed date.
    let mut out = Vec::with_capacity(n + horizon);
    for point in points {
        let t = (point.date - origin).num_days() as f64 / DAYS_PER_YEAR;
        out.push(ForecastPoint {
            date: point.date,
            predicted: predict(t, &beta),
        });
    }
    let last = points[n - 1].date;
    for i in 1..=horizon {
        let date = last + Duration::weeks(i as i64);
        let t = (date - origin).num_days() as f64 / DAYS_PER_YEAR;
        out.push(ForecastPoint {
            date,
            predicted: predict(t, &beta),
        });
    }

    Ok(ForecastResult {
        store: series.store,
        dept: series.dept,
        horizon,
        history_len: n,
        points: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;
    use chrono::NaiveDate;

    /// Weekly series following `level + slope*t + amp*sin(2πt)` exactly.
    fn synthetic_series(weeks: usize) -> SalesSeries {
        let start = NaiveDate::from_ymd_opt(2010, 2, 5).unwrap();
        let points = (0..weeks)
            .map(|i| {
                let date = start + Duration::weeks(i as i64);
                let t = (date - start).num_days() as f64 / DAYS_PER_YEAR;
                SeriesPoint {
                    date,
                    value: 1000.0 + 50.0 * t + 200.0 * (std::f64::consts::TAU * t).sin(),
                }
            })
            .collect();
        SalesSeries::new(1, 1, points).unwrap()
    }

    #[test]
    fn tail_has_exactly_horizon_weekly_steps() {
        let series = synthetic_series(104);
        let result = forecast(&series, 12).unwrap();

        assert_eq!(result.points.len(), 104 + 12);
        let tail = result.tail();
        assert_eq!(tail.len(), 12);

        let last_observed = series.last_date().unwrap();
        assert_eq!(tail[0].date, last_observed + Duration::weeks(1));
        for pair in tail.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::weeks(1));
        }
    }

    #[test]
    fn recovers_a_noiseless_seasonal_series() {
        let series = synthetic_series(104);
        let result = forecast(&series, 8).unwrap();

        // Historical re-cover should be near-exact: the generating process is
        // inside the model family.
        for (observed, fitted) in series.points().iter().zip(result.points.iter()) {
            assert!(
                (observed.value - fitted.predicted).abs() < 1.0,
                "fit diverged at {}: {} vs {}",
                observed.date,
                observed.value,
                fitted.predicted
            );
        }

        // And the tail should continue the same trajectory.
        let start = series.points()[0].date;
        for p in result.tail() {
            let t = (p.date - start).num_days() as f64 / DAYS_PER_YEAR;
            let truth = 1000.0 + 50.0 * t + 200.0 * (std::f64::consts::TAU * t).sin();
            assert!(
                (p.predicted - truth).abs() < 25.0,
                "tail diverged at {}: {} vs {}",
                p.date,
                p.predicted,
                truth
            );
        }
    }

    #[test]
    fn short_history_is_an_insufficient_history_error() {
        let series = synthetic_series(8);
        let err = forecast(&series, 4).unwrap_err();
        match err {
            AppError::InsufficientHistory { needed, got } => {
                assert_eq!(needed, MIN_HISTORY);
                assert_eq!(got, 8);
            }
            other => panic!("expected InsufficientHistory, got {other:?}"),
        }
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let series = synthetic_series(52);
        assert!(matches!(forecast(&series, 0), Err(AppError::Usage(_))));
    }
}
