//! Gutenberg-Richter fit for a single completeness magnitude.
//!
//! Given an FMD and a candidate Mc we:
//! 1. keep bins with `gr_mag >= Mc` and take `y = log10(N)`
//! 2. optionally drop the sparse tail where `N < nmin`
//! 3. run the maximum-likelihood estimate and the least-squares line on the
//!    retained points (two independent estimators, compared downstream)
//! 4. evaluate both curves plus a ±2σ regression band over the step-1 range
//!
//! The nmin filter only trims the points the estimators see; the prediction
//! grid always spans every bin selected in step 1.

use crate::domain::{FitResult, Fmd, PredictionBand};
use crate::error::GrError;
use crate::fit::mle::ml_estimate;
use crate::fit::regression::fit_line;
use crate::math::arange;
use crate::models::{predict_gr, predict_line};

/// Fit the GR law above `mc`.
///
/// `nmin` of `None` or `Some(0)` disables the minimum-count filter.
pub fn fit_gr_law(fmd: &Fmd, mc: f64, bin_width: f64, nmin: Option<u64>) -> Result<FitResult, GrError> {
    // Step 1: Mc threshold. Empty cumulative bins have no log count and are skipped.
    let (x, y): (Vec<f64>, Vec<f64>) = fmd
        .gr_mag
        .iter()
        .zip(&fmd.gr_freq)
        .filter(|&(&m, &n)| m >= mc && n > 0)
        .map(|(&m, &n)| (m, (n as f64).log10()))
        .unzip();

    if x.is_empty() {
        let top = fmd.gr_mag.last().copied().unwrap_or(f64::NAN);
        return Err(GrError::insufficient(
            mc,
            format!("no FMD bins at or above Mc (highest bin starts at {top:.2})"),
        ));
    }

    // Step 2: minimum-count filter.
    let (x_reg, y_reg): (Vec<f64>, Vec<f64>) = match nmin {
        Some(n) if n > 0 => {
            let threshold = (n as f64).log10();
            x.iter()
                .zip(&y)
                .filter(|&(_, &yi)| yi >= threshold)
                .map(|(&xi, &yi)| (xi, yi))
                .unzip()
        }
        _ => (x.clone(), y.clone()),
    };

    if x_reg.len() < 2 {
        return Err(GrError::insufficient(
            mc,
            format!(
                "{} point(s) left for regression after nmin={} filter (need 2)",
                x_reg.len(),
                nmin.unwrap_or(0)
            ),
        ));
    }

    // Step 3: the two estimators.
    let ml = ml_estimate(&x_reg, &y_reg, mc, bin_width)?;
    let line = fit_line(&x_reg, &y_reg)
        .ok_or_else(|| GrError::insufficient(mc, "least-squares line could not be solved"))?;

    log::debug!(
        "Mc={mc:.2}: ML a={:.3} b={:.3} | LS a={:.3} b={:.3} n={}",
        ml.a,
        ml.b,
        line.intercept,
        -line.slope,
        line.n_obs
    );

    // Step 4: prediction grid over the step-1 range.
    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let xpredict = arange(x_min, x_max + bin_width, bin_width)?;

    let ypredict_reg: Vec<f64> = xpredict
        .iter()
        .map(|&m| predict_line(line.intercept, line.slope, m))
        .collect();
    let ypredict_ml: Vec<f64> = xpredict.iter().map(|&m| predict_gr(ml.a, ml.b, m)).collect();

    let sigma = line.scale.map(f64::sqrt);
    let lower = sigma.map(|s| ypredict_reg.iter().map(|v| v - 2.0 * s).collect());
    let upper = sigma.map(|s| ypredict_reg.iter().map(|v| v + 2.0 * s).collect());

    Ok(FitResult {
        mc,
        a_ml: ml.a,
        b_ml: ml.b,
        a_reg: line.intercept,
        b_reg: -line.slope,
        a_se: line.intercept_se,
        b_se: line.slope_se,
        r_squared: line.r_squared,
        n_obs: line.n_obs,
        sigma,
        band: PredictionBand {
            xpredict,
            ypredict_ml,
            ypredict_reg,
            lower,
            upper,
        },
    })
}
