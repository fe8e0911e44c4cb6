//! Maximum-likelihood b-value (Aki, 1965; Bender, 1983; Utsu, 1999).
//!
//! ```text
//! b = ln(10) · log10(e) / (mean(M) - (Mc - ΔM / 2))
//! a = log10 N_0 + b · M_0
//! ```
//!
//! `M` are the FMD magnitudes retained for the regression and `(M_0, N_0)` is
//! the first (lowest-magnitude) of them. The `ΔM / 2` term corrects for binning.

use std::f64::consts::E;

use crate::error::GrError;

/// Maximum-likelihood a/b pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MlEstimate {
    pub a: f64,
    /// Positive b-value.
    pub b: f64,
}

/// Estimate a and b from log10 cumulative counts `y` at magnitudes `x`.
pub fn ml_estimate(x: &[f64], y: &[f64], mc: f64, bin_width: f64) -> Result<MlEstimate, GrError> {
    let (Some(&x0), Some(&y0)) = (x.first(), y.first()) else {
        return Err(GrError::insufficient(mc, "no points for the maximum-likelihood estimate"));
    };

    let mean = x.iter().sum::<f64>() / x.len() as f64;
    let denom = mean - (mc - bin_width / 2.0);
    if !(denom.is_finite() && denom > 0.0) {
        return Err(GrError::insufficient(
            mc,
            format!("mean magnitude {mean:.3} is not above Mc - ΔM/2"),
        ));
    }

    let b = 10f64.ln() * E.log10() / denom;
    let a = y0 + b * x0;
    Ok(MlEstimate { a, b })
}
