//! Least-squares line fit `y = intercept + slope · x`.
//!
//! Besides the coefficients we report what the FMD plots and summaries need:
//! - standard errors from `scale · (XᵀX)⁻¹`
//! - the residual scale `SSE / (n - 2)`
//! - R² as a fraction
//!
//! Quantities that are undefined for the given sample (zero residual degrees of
//! freedom, constant `y`) are reported as `None` rather than NaN.

use nalgebra::{DMatrix, DVector};

use crate::math::{coefficient_std_errors, solve_least_squares};
use crate::models::{fill_design_row, predict_line};

/// Number of regression coefficients (intercept + slope).
const N_COEF: usize = 2;

/// Ordinary least-squares line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
    pub intercept_se: Option<f64>,
    pub slope_se: Option<f64>,
    pub r_squared: Option<f64>,
    /// Residual variance estimate `SSE / (n - 2)`.
    pub scale: Option<f64>,
    pub sse: f64,
    pub n_obs: usize,
}

/// Fit a straight line.
///
/// Returns `None` with fewer than two points, mismatched lengths, non-finite
/// inputs, or constant `x`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < N_COEF || y.len() != n {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    let x_mean = x.iter().sum::<f64>() / n as f64;
    if x.iter().all(|&v| v == x_mean) {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, N_COEF);
    let mut row = [0.0; N_COEF];
    for (i, &xi) in x.iter().enumerate() {
        fill_design_row(xi, &mut row);
        for (j, v) in row.iter().enumerate() {
            design[(i, j)] = *v;
        }
    }
    let obs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &obs)?;
    let (intercept, slope) = (beta[0], beta[1]);

    let sse: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let r = yi - predict_line(intercept, slope, xi);
            r * r
        })
        .sum();

    let y_mean = y.iter().sum::<f64>() / n as f64;
    let sst: f64 = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();
    let r_squared = (sst > 0.0).then(|| 1.0 - sse / sst);

    let dof = n - N_COEF;
    let scale = (dof > 0).then(|| sse / dof as f64);
    let std_errors = scale.and_then(|s| coefficient_std_errors(&design, s));
    let (intercept_se, slope_se) = match std_errors.as_deref() {
        Some([a, b]) => (Some(*a), Some(*b)),
        _ => (None, None),
    };

    Some(LineFit {
        intercept,
        slope,
        intercept_se,
        slope_se,
        r_squared,
        scale,
        sse,
        n_obs: n,
    })
}
