//! Ordinary least squares helpers.
//!
//! The regressions in this crate are tiny (one FMD line per completeness
//! magnitude, two columns), so we favour robustness over speed:
//! - coefficients come from an SVD solve, which handles tall design matrices
//!   (nalgebra's `QR::solve` is intended for square systems)
//! - the coefficient covariance is `scale * (XᵀX)⁻¹`, where `scale` is the
//!   residual variance estimate `SSE / (n - p)`

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Standard errors of the coefficients: `sqrt(diag(scale * (XᵀX)⁻¹))`.
///
/// Returns `None` if `XᵀX` is singular.
pub fn coefficient_std_errors(x: &DMatrix<f64>, scale: f64) -> Option<Vec<f64>> {
    let xtx = x.transpose() * x;
    let inv = xtx.try_inverse()?;
    Some((0..inv.nrows()).map(|i| (scale * inv[(i, i)]).max(0.0).sqrt()).collect())
}
