//! The Gutenberg-Richter law `log10 N(M) = a - b M`.
//!
//! Two parameterizations are in use:
//! - regression output is an intercept and a signed slope (`a + slope * M`)
//! - the maximum-likelihood output is an a-value and a positive b-value (`a - b * M`)

/// Fill a design row `[1, m]` for the straight-line regression.
///
/// # Panics
/// Panics if `out` has fewer than 2 elements.
pub fn fill_design_row(m: f64, out: &mut [f64]) {
    out[0] = 1.0;
    out[1] = m;
}

/// `intercept + slope * m`.
pub fn predict_line(intercept: f64, slope: f64, m: f64) -> f64 {
    intercept + slope * m
}

/// `a - b * m` with `b` reported as a positive b-value.
pub fn predict_gr(a: f64, b: f64, m: f64) -> f64 {
    a - b * m
}
