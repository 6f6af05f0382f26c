//! Yearly-seasonality design rows for harmonic regression.
//!
//! The seasonal model for a weekly sales series is:
//!
//! ```text
//! y(t) = β0 + β1·t + Σ_k [ a_k·sin(2πkt) + b_k·cos(2πkt) ]
//! ```
//!
//! with `t` in years since the first observation. Only yearly harmonics are
//! included: the data cadence is weekly, so weekly/daily seasonal terms are
//! meaningless here.
//!
//! Numerical notes:
//! - The model is linear in the coefficients, so fitting is a single least
//!   squares solve (`math::ols`), and prediction extrapolates cleanly past
//!   the observed range.
//! - The harmonic count scales with history length: a series shorter than a
//!   full cycle cannot identify high-frequency yearly structure.

/// Pragmatic year denominator for converting day offsets to years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of yearly harmonics used for a history of `n` weekly points.
pub fn harmonic_count(n: usize) -> usize {
    match n {
        0..=23 => 1,
        24..=51 => 2,
        52..=103 => 3,
        _ => 4,
    }
}

/// Coefficient count for a model with `harmonics` yearly harmonics
/// (intercept + trend + sin/cos pair per harmonic).
pub fn param_count(harmonics: usize) -> usize {
    2 + 2 * harmonics
}

/// Fill one design row for time `t_years`.
///
/// `row.len()` must equal `param_count(harmonics)`.
pub fn fill_design_row(t_years: f64, harmonics: usize, row: &mut [f64]) {
    debug_assert_eq!(row.len(), param_count(harmonics));
    row[0] = 1.0;
    row[1] = t_years;
    for k in 1..=harmonics {
        let angle = std::f64::consts::TAU * k as f64 * t_years;
        row[2 * k] = angle.sin();
        row[2 * k + 1] = angle.cos();
    }
}

/// Evaluate the fitted model at `t_years`.
///
/// The harmonic count is implied by `beta.len()`.
pub fn predict(t_years: f64, beta: &[f64]) -> f64 {
    debug_assert!(beta.len() >= 2 && beta.len() % 2 == 0);
    let harmonics = (beta.len() - 2) / 2;
    let mut y = beta[0] + beta[1] * t_years;
    for k in 1..=harmonics {
        let angle = std::f64::consts::TAU * k as f64 * t_years;
        y += beta[2 * k] * angle.sin() + beta[2 * k + 1] * angle.cos();
    }
    y
}
