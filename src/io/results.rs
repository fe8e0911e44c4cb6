//! Read/write estimation results as JSON.
//!
//! The results file is the portable representation of a run:
//! - the configuration the core was run with
//! - the histogram, FMD and Maximum-Curvature curve
//! - one report per completeness magnitude (fit or failure reason)
//!
//! It carries everything an external renderer needs, and `bvalue plot` reloads
//! it to redraw the terminal plots.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{CurvatureCurve, EstimationConfig, FitResult, Fmd, Histogram, McOutcome, YLim};
use crate::error::AppError;
use crate::fit::EstimationRun;

/// Per-Mc record: either a fit or the reason it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McReport {
    pub mc: f64,
    pub fit: Option<FitResult>,
    pub error: Option<String>,
}

impl From<&McOutcome> for McReport {
    fn from(outcome: &McOutcome) -> Self {
        match &outcome.result {
            Ok(fit) => McReport {
                mc: outcome.mc,
                fit: Some(fit.clone()),
                error: None,
            },
            Err(err) => McReport {
                mc: outcome.mc,
                fit: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// A saved results file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub catalogue: Option<String>,
    pub config: EstimationConfig,
    pub ylim: Option<YLim>,
    pub n_events: usize,
    pub histogram: Histogram,
    pub fmd: Fmd,
    pub curvature: CurvatureCurve,
    pub completeness: Vec<f64>,
    pub reports: Vec<McReport>,
}

impl ResultsFile {
    pub fn from_run(
        run: &EstimationRun,
        config: &EstimationConfig,
        catalogue: Option<&Path>,
        ylim: Option<YLim>,
    ) -> Self {
        Self {
            tool: "bvalue".to_string(),
            generated: Local::now(),
            catalogue: catalogue.map(|p| p.display().to_string()),
            config: config.clone(),
            ylim,
            n_events: run.n_events,
            histogram: run.histogram.clone(),
            fmd: run.fmd.clone(),
            curvature: run.curvature.clone(),
            completeness: run.completeness.as_slice().to_vec(),
            reports: run.outcomes.iter().map(McReport::from).collect(),
        }
    }

    /// Report for an exact Mc value.
    pub fn report(&self, mc: f64) -> Option<&McReport> {
        self.reports.iter().find(|r| r.mc == mc)
    }
}

/// Write a results JSON file.
pub fn write_results_json(path: &Path, results: &ResultsFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, results)
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;
    Ok(())
}

/// Read a results JSON file.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open results JSON '{}': {e}", path.display())))?;
    let results: ResultsFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid results JSON: {e}")))?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BinSpec;
    use crate::fit::run_estimation;

    fn sample_run() -> (EstimationRun, EstimationConfig) {
        let config = EstimationConfig {
            mmin: 0.0,
            mmax: 5.0,
            bins: BinSpec::Width(0.5),
            mc_list: vec![1.0, 6.0],
            nmin: None,
        };
        let mags = [1.0, 1.0, 1.1, 1.2, 2.0, 2.0, 2.1, 3.0, 3.0, 3.0, 4.5];
        (run_estimation(&mags, &config).unwrap(), config)
    }

    #[test]
    fn reports_carry_fit_or_error() {
        let (run, config) = sample_run();
        let results = ResultsFile::from_run(&run, &config, None, None);

        let failed = results.report(6.0).unwrap();
        assert!(failed.fit.is_none());
        assert!(failed.error.as_deref().unwrap().contains("Mc=6.00"));

        let ok = results.report(1.0).unwrap();
        assert!(ok.fit.is_some() && ok.error.is_none());
    }

    #[test]
    fn results_survive_a_file_round_trip() {
        let (run, config) = sample_run();
        let ylim = Some(YLim { lo: 0.0, hi: 30.0 });
        let results = ResultsFile::from_run(&run, &config, Some(Path::new("cat.csv")), ylim);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        write_results_json(&path, &results).unwrap();
        let back = read_results_json(&path).unwrap();

        assert_eq!(back.tool, "bvalue");
        assert_eq!(back.catalogue.as_deref(), Some("cat.csv"));
        assert_eq!(back.config, config);
        assert_eq!(back.fmd, results.fmd);
        assert_eq!(back.reports.len(), results.reports.len());
        assert_eq!(back.ylim, ylim);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(read_results_json(&path).unwrap_err().exit_code(), 2);
    }
}
