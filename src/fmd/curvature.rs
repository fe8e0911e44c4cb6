//! Maximum-Curvature completeness estimate.
//!
//! Under the Gutenberg-Richter law the cumulative FMD is a straight line in
//! log-count; below the magnitude of completeness it rolls off because small
//! events go undetected. The magnitude where |dN/dM| peaks marks that bend and
//! is taken as a (conservative) Mc.

use crate::domain::{CurvatureCurve, Fmd};
use crate::math::{argmax_first, gradient, round_to};

/// Decimal places of the reported completeness magnitude.
pub const MC_DECIMALS: i32 = 1;

/// Compute |dN/dM| over the FMD and the magnitude at its first maximum.
///
/// Returns `None` for an empty FMD.
pub fn max_curvature(fmd: &Fmd) -> Option<CurvatureCurve> {
    let freq: Vec<f64> = fmd.gr_freq.iter().map(|&n| n as f64).collect();
    let abs_gradient: Vec<f64> = gradient(&freq, &fmd.gr_mag).into_iter().map(f64::abs).collect();

    let peak_index = argmax_first(&abs_gradient)?;
    let mc = round_to(fmd.gr_mag[peak_index], MC_DECIMALS);

    log::debug!(
        "max curvature at index {peak_index} (M={:.3}, |dN/dM|={:.3}) -> Mc={mc:.1}",
        fmd.gr_mag[peak_index],
        abs_gradient[peak_index]
    );

    Some(CurvatureCurve {
        magnitudes: fmd.gr_mag.clone(),
        abs_gradient,
        peak_index,
        mc,
    })
}
