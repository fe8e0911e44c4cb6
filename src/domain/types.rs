//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during estimation
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, GrError};

/// How magnitudes are binned into a histogram.
///
/// The variant is chosen by how the value is written: `0.1` or `1e-1` is a bin
/// width, `20` is a bin count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinSpec {
    /// Fixed bin width in magnitude units.
    Width(f64),
    /// Fixed number of equal-width bins over `[min, max]`.
    Count(usize),
}

impl FromStr for BinSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let is_float = s.contains(['.', 'e', 'E']) || s.eq_ignore_ascii_case("inf") || s.eq_ignore_ascii_case("nan");
        if is_float {
            let width: f64 = s.parse().map_err(|e| format!("invalid bin width '{s}': {e}"))?;
            Ok(BinSpec::Width(width))
        } else {
            let count: usize = s.parse().map_err(|e| format!("invalid bin count '{s}': {e}"))?;
            Ok(BinSpec::Count(count))
        }
    }
}

impl fmt::Display for BinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinSpec::Width(w) => write!(f, "width {w}"),
            BinSpec::Count(n) => write!(f, "{n} bins"),
        }
    }
}

/// Filtered magnitudes, largest first.
///
/// Only [`crate::fmd::filter_magnitudes`] constructs this, so every value is
/// finite and within the accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeSeries {
    values: Vec<f64>,
}

impl MagnitudeSeries {
    /// Callers must pass finite values sorted descending.
    pub(crate) fn from_sorted_desc(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Discrete per-bin counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, ascending (`counts.len() + 1` values).
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Cumulative frequency-magnitude distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fmd {
    /// Left bin edges, ascending.
    pub gr_mag: Vec<f64>,
    /// Number of events with magnitude >= `gr_mag[i]`.
    pub gr_freq: Vec<u64>,
    /// Per-bin counts the cumulative series was built from.
    pub discrete: Vec<u64>,
    /// Effective bin width (`edges[1] - edges[0]`).
    pub bin_width: f64,
}

impl Fmd {
    pub fn len(&self) -> usize {
        self.gr_mag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gr_mag.is_empty()
    }

    /// Total number of binned events.
    pub fn total_events(&self) -> u64 {
        self.gr_freq.first().copied().unwrap_or(0)
    }
}

/// |dN/dM| over the FMD and the completeness magnitude it implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvatureCurve {
    pub magnitudes: Vec<f64>,
    pub abs_gradient: Vec<f64>,
    /// Index of the first maximum of `abs_gradient`.
    pub peak_index: usize,
    /// `magnitudes[peak_index]` rounded to one decimal.
    pub mc: f64,
}

impl CurvatureCurve {
    /// Unrounded magnitude at the curvature peak.
    pub fn peak_magnitude(&self) -> f64 {
        self.magnitudes[self.peak_index]
    }
}

/// Candidate completeness magnitudes, unique and ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessSet {
    values: Vec<f64>,
}

impl CompletenessSet {
    /// Merge the configured values with the Maximum-Curvature estimate.
    ///
    /// Duplicates are removed by exact equality; non-finite values are dropped.
    pub fn new(configured: &[f64], max_curvature: f64) -> Self {
        let mut values: Vec<f64> = configured
            .iter()
            .copied()
            .chain(std::iter::once(max_curvature))
            .filter(|v| v.is_finite())
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, mc: f64) -> bool {
        self.values.contains(&mc)
    }
}

/// Predicted GR curves over a magnitude grid, in log10(N) units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBand {
    pub xpredict: Vec<f64>,
    pub ypredict_ml: Vec<f64>,
    pub ypredict_reg: Vec<f64>,
    /// `ypredict_reg - 2σ`; absent when the residual scale is undefined.
    pub lower: Option<Vec<f64>>,
    /// `ypredict_reg + 2σ`; absent when the residual scale is undefined.
    pub upper: Option<Vec<f64>>,
}

/// Estimates for a single completeness magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub mc: f64,
    /// Maximum-likelihood a-value.
    pub a_ml: f64,
    /// Maximum-likelihood b-value (positive).
    pub b_ml: f64,
    /// Regression intercept.
    pub a_reg: f64,
    /// Regression b-value, i.e. the negated slope (positive for a decaying FMD).
    pub b_reg: f64,
    /// Standard error of `a_reg` (`None` with zero residual degrees of freedom).
    pub a_se: Option<f64>,
    /// Standard error of `b_reg`.
    pub b_se: Option<f64>,
    /// Coefficient of determination as a fraction (`None` if y is constant).
    pub r_squared: Option<f64>,
    /// Points used by the regression.
    pub n_obs: usize,
    /// Square root of the regression residual scale.
    pub sigma: Option<f64>,
    pub band: PredictionBand,
}

impl FitResult {
    pub fn r_squared_percent(&self) -> Option<f64> {
        self.r_squared.map(|r| 100.0 * r)
    }
}

/// Fit outcome for one Mc; failures are kept in place of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct McOutcome {
    pub mc: f64,
    pub result: Result<FitResult, GrError>,
}

/// Numeric parameters consumed by the estimation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationConfig {
    pub mmin: f64,
    pub mmax: f64,
    pub bins: BinSpec,
    /// Configured completeness magnitudes (the Maximum-Curvature value is added at run time).
    pub mc_list: Vec<f64>,
    /// Minimum cumulative count for regression points (`None` keeps all).
    pub nmin: Option<u64>,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            mmin: 0.0,
            mmax: 6.8,
            bins: BinSpec::Width(0.1),
            mc_list: vec![0.0, 2.2],
            nmin: Some(5),
        }
    }
}

impl EstimationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.mmin.is_finite() && self.mmax.is_finite() && self.mmax >= self.mmin) {
            return Err(AppError::new(
                2,
                format!(
                    "Invalid magnitude range: mmin={}, mmax={} (must be finite and mmax>=mmin).",
                    self.mmin, self.mmax
                ),
            ));
        }
        match self.bins {
            BinSpec::Width(w) if !(w.is_finite() && w > 0.0) => {
                return Err(AppError::new(2, format!("Bin width must be finite and > 0 (got {w}).")));
            }
            BinSpec::Count(0) => return Err(AppError::new(2, "Bin count must be >= 1.")),
            _ => {}
        }
        if let Some(bad) = self.mc_list.iter().find(|v| !v.is_finite()) {
            return Err(AppError::new(2, format!("Invalid completeness magnitude: {bad}.")));
        }
        Ok(())
    }
}

/// Display range for FMD plots, in event counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YLim {
    pub lo: f64,
    pub hi: f64,
}

impl FromStr for YLim {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LO,HI (got '{s}')"))?;
        let lo: f64 = lo.trim().parse().map_err(|e| format!("invalid ylim lower bound: {e}"))?;
        let hi: f64 = hi.trim().parse().map_err(|e| format!("invalid ylim upper bound: {e}"))?;
        if !(hi.is_finite() && hi > 0.0 && hi > lo) {
            return Err(format!("ylim upper bound must be > 0 and > lower bound (got {lo},{hi})"));
        }
        Ok(YLim { lo, hi })
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and environment).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub catalogue: PathBuf,
    /// Magnitude column override.
    pub column: Option<String>,
    pub estimation: EstimationConfig,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub ylim: Option<YLim>,

    pub export_fmd: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_spec_is_chosen_by_literal_form() {
        assert_eq!("0.1".parse::<BinSpec>().unwrap(), BinSpec::Width(0.1));
        assert_eq!("1e-1".parse::<BinSpec>().unwrap(), BinSpec::Width(0.1));
        assert_eq!("20".parse::<BinSpec>().unwrap(), BinSpec::Count(20));
        assert!("abc".parse::<BinSpec>().is_err());
        assert!("-3".parse::<BinSpec>().is_err());
    }

    #[test]
    fn completeness_set_dedupes_and_sorts() {
        let set = CompletenessSet::new(&[2.2, 0.0, 2.2], 1.4);
        assert_eq!(set.as_slice(), &[0.0, 1.4, 2.2]);

        let set = CompletenessSet::new(&[0.0, 2.2], 2.2);
        assert_eq!(set.as_slice(), &[0.0, 2.2]);
        assert!(set.contains(2.2));
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        assert!(EstimationConfig::default().validate().is_ok());

        let cfg = EstimationConfig {
            mmin: 3.0,
            mmax: 1.0,
            ..EstimationConfig::default()
        };
        assert_eq!(cfg.validate().unwrap_err().exit_code(), 2);

        let cfg = EstimationConfig {
            bins: BinSpec::Width(0.0),
            ..EstimationConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = EstimationConfig {
            mc_list: vec![f64::NAN],
            ..EstimationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn ylim_parses_pair() {
        let y: YLim = "0,3e4".parse().unwrap();
        assert_eq!(y, YLim { lo: 0.0, hi: 3e4 });
        assert!("5".parse::<YLim>().is_err());
        assert!("10,1".parse::<YLim>().is_err());
    }
}
