//! Least squares solver for the seasonal regression.
//!
//! Fitting a sales series means solving one linear regression:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! where each design row `x_i` holds the trend and yearly-seasonality terms
//! for observation `i` (see `math::seasonal`).
//!
//! Implementation choices:
//! - SVD solve, which handles tall matrices (many weeks, few parameters) and
//!   stays robust when harmonic columns are nearly collinear on short or
//!   gappy histories. (Nalgebra's `QR::solve` is intended for square systems
//!   and will panic for non-square matrices.)
//! - The parameter dimension is tiny (4–10 columns), so SVD cost is
//!   negligible next to reading the snapshot.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn tall_system_recovers_exact_fit() {
        // y = 1 + 2x over ten points; the solve must be exact to tolerance.
        let n = 10;
        let mut x = DMatrix::zeros(n, 2);
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let t = i as f64;
            x[(i, 0)] = 1.0;
            x[(i, 1)] = t;
            y[i] = 1.0 + 2.0 * t;
        }
        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-8);
        assert!((beta[1] - 2.0).abs() < 1e-8);
    }
}
