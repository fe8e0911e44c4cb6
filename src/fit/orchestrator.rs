//! Estimation over a set of completeness magnitudes.
//!
//! The FMD is built once; each Mc is then fitted independently (in parallel)
//! against the same read-only FMD. A failed Mc is recorded in place and does
//! not stop the others.

use rayon::prelude::*;

use crate::domain::{
    BinSpec, CompletenessSet, CurvatureCurve, EstimationConfig, FitResult, Fmd, Histogram, MagnitudeSeries,
    McOutcome,
};
use crate::error::GrError;
use crate::fit::fitter::fit_gr_law;
use crate::fmd::{build_fmd, filter_magnitudes, max_curvature};

/// All computed outputs of a single estimation run.
#[derive(Debug, Clone)]
pub struct EstimationRun {
    /// Events that passed the magnitude filter.
    pub n_events: usize,
    pub histogram: Histogram,
    pub fmd: Fmd,
    pub curvature: CurvatureCurve,
    pub completeness: CompletenessSet,
    /// One outcome per completeness magnitude, ascending by Mc.
    pub outcomes: Vec<McOutcome>,
}

impl EstimationRun {
    /// Outcome for an exact Mc value.
    pub fn outcome(&self, mc: f64) -> Option<&McOutcome> {
        self.outcomes.iter().find(|o| o.mc == mc)
    }

    /// Successful fits, ascending by Mc.
    pub fn fits(&self) -> impl Iterator<Item = &FitResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed Mc values and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (f64, &GrError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.mc, e)))
    }
}

/// Filter raw magnitudes and run the estimation.
pub fn run_estimation(magnitudes: &[f64], config: &EstimationConfig) -> Result<EstimationRun, GrError> {
    let series = filter_magnitudes(magnitudes, config.mmin, config.mmax)?;
    log::info!(
        "{} of {} magnitudes within [{}, {}]",
        series.len(),
        magnitudes.len(),
        config.mmin,
        config.mmax
    );
    estimate_series(&series, config)
}

/// Build the FMD, add the Maximum-Curvature Mc, and fit every completeness value.
pub fn estimate_series(series: &MagnitudeSeries, config: &EstimationConfig) -> Result<EstimationRun, GrError> {
    let (histogram, fmd) = build_fmd(series, config.bins)?;
    let curvature = max_curvature(&fmd).ok_or_else(|| GrError::InvalidBins("FMD has no bins".to_string()))?;
    log::info!("Maximum-Curvature Mc={:.1}", curvature.mc);

    let completeness = CompletenessSet::new(&config.mc_list, curvature.mc);
    let bin_width = fit_bin_width(config.bins, &fmd);
    let outcomes = fit_all(&fmd, &completeness, bin_width, config.nmin);

    Ok(EstimationRun {
        n_events: series.len(),
        histogram,
        fmd,
        curvature,
        completeness,
        outcomes,
    })
}

/// Fit each completeness magnitude independently.
///
/// Outcomes come back in the order of `completeness`.
pub fn fit_all(fmd: &Fmd, completeness: &CompletenessSet, bin_width: f64, nmin: Option<u64>) -> Vec<McOutcome> {
    completeness
        .as_slice()
        .par_iter()
        .map(|&mc| {
            log::info!(">> working on Mc={mc:?}");
            let result = fit_gr_law(fmd, mc, bin_width, nmin);
            if let Err(err) = &result {
                log::warn!("skipping Mc={mc}: {err}");
            }
            McOutcome { mc, result }
        })
        .collect()
}

/// Bin width used by the fitter: the configured width, or the computed
/// width when bins are given as a count.
pub fn fit_bin_width(bins: BinSpec, fmd: &Fmd) -> f64 {
    match bins {
        BinSpec::Width(w) => w,
        BinSpec::Count(_) => fmd.bin_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config(mc_list: Vec<f64>) -> EstimationConfig {
        EstimationConfig {
            mmin: 0.0,
            mmax: 5.0,
            bins: BinSpec::Width(0.5),
            mc_list,
            nmin: None,
        }
    }

    const SCENARIO: [f64; 11] = [1.0, 1.0, 1.1, 1.2, 2.0, 2.0, 2.1, 3.0, 3.0, 3.0, 4.5];

    #[test]
    fn completeness_set_includes_max_curvature() {
        let run = run_estimation(&SCENARIO, &scenario_config(vec![1.0, 2.0])).unwrap();
        assert!(run.completeness.contains(run.curvature.mc));
        assert!(run.completeness.contains(1.0));
        assert!(run.completeness.contains(2.0));
        let mcs: Vec<f64> = run.outcomes.iter().map(|o| o.mc).collect();
        assert_eq!(mcs, run.completeness.as_slice());
        assert_eq!(run.n_events, 11);
    }

    #[test]
    fn failing_mc_does_not_abort_others() {
        let run = run_estimation(&SCENARIO, &scenario_config(vec![1.0, 6.0])).unwrap();

        let failed = run.outcome(6.0).unwrap();
        assert!(matches!(failed.result, Err(GrError::InsufficientData { .. })));

        let ok = run.outcome(1.0).unwrap();
        let fit = ok.result.as_ref().unwrap();
        assert_eq!(fit.n_obs, 8);
        assert!(fit.b_reg > 0.0);

        assert_eq!(run.failures().count(), 1);
        assert!(run.fits().count() >= 1);
    }

    #[test]
    fn filter_and_fmd_errors_are_fatal() {
        let err = run_estimation(&SCENARIO, &EstimationConfig { mmin: 5.5, mmax: 6.0, ..scenario_config(vec![]) })
            .unwrap_err();
        assert!(matches!(err, GrError::EmptyInput { .. }));

        let err = run_estimation(&[2.0, 2.0, 2.0], &scenario_config(vec![2.0])).unwrap_err();
        assert!(matches!(err, GrError::DegenerateRange { .. }));
    }

    #[test]
    fn count_bins_use_the_computed_width() {
        let config = EstimationConfig {
            bins: BinSpec::Count(7),
            ..scenario_config(vec![1.0])
        };
        let run = run_estimation(&SCENARIO, &config).unwrap();
        assert_eq!(run.fmd.len(), 7);
        assert!((run.fmd.bin_width - 0.5).abs() < 1e-12);
        assert_eq!(fit_bin_width(config.bins, &run.fmd), run.fmd.bin_width);
        assert!(run.outcome(1.0).unwrap().result.is_ok());
    }
}
