//! Shared estimation pipeline used by the `fit` and `fmd` commands.
//!
//! catalogue ingest -> magnitude filter -> FMD -> Maximum-Curvature Mc -> per-Mc fits

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::fit::{EstimationRun, run_estimation};
use crate::io::{Catalogue, load_catalogue};

/// Row errors echoed to the log before the rest are summarised.
const MAX_LOGGED_ROW_ERRORS: usize = 10;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub catalogue: Catalogue,
    pub run: EstimationRun,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    config.estimation.validate()?;

    // 1) Read magnitudes.
    let catalogue = load_catalogue(&config.catalogue, config.column.as_deref())?;
    for err in catalogue.row_errors.iter().take(MAX_LOGGED_ROW_ERRORS) {
        log::warn!("line {}: {}", err.line, err.message);
    }
    if catalogue.row_errors.len() > MAX_LOGGED_ROW_ERRORS {
        log::warn!(
            "... {} more rows skipped",
            catalogue.row_errors.len() - MAX_LOGGED_ROW_ERRORS
        );
    }

    // 2) Filter, bin and fit.
    let run = run_estimation(&catalogue.magnitudes, &config.estimation)?;

    Ok(RunOutput { catalogue, run })
}
