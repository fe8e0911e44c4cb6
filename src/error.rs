//! Error types.
//!
//! - [`GrError`] is the estimation core's taxonomy. Filter and FMD errors are
//!   fatal to a run, fitter errors are scoped to a single Mc.
//! - [`AppError`] is what the binary reports: a message plus a process exit code.
//!
//! Exit codes:
//! - 2: invalid arguments or unreadable/invalid files
//! - 3: no usable data
//! - 4: internal numeric failure

use thiserror::Error;

/// Failures of the estimation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrError {
    /// No magnitudes pass the `[mmin, mmax]` filter.
    #[error("No magnitudes within [{mmin}, {mmax}].")]
    EmptyInput { mmin: f64, mmax: f64 },

    /// All magnitudes are equal, so no bin range can be formed.
    #[error("Degenerate magnitude range: min = max = {value}.")]
    DegenerateRange { value: f64 },

    /// Not enough FMD points at a given completeness magnitude.
    #[error("Insufficient data at Mc={mc:.2}: {reason}")]
    InsufficientData { mc: f64, reason: String },

    /// Bin specification cannot produce a histogram.
    #[error("Invalid bin specification: {0}")]
    InvalidBins(String),
}

impl GrError {
    pub(crate) fn insufficient(mc: f64, reason: impl Into<String>) -> Self {
        GrError::InsufficientData {
            mc,
            reason: reason.into(),
        }
    }

    /// Exit code used when this error ends the program.
    pub fn exit_code(&self) -> u8 {
        match self {
            GrError::InvalidBins(_) => 2,
            GrError::EmptyInput { .. } | GrError::DegenerateRange { .. } => 3,
            GrError::InsufficientData { .. } => 3,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<GrError> for AppError {
    fn from(err: GrError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gr_error_maps_to_exit_codes() {
        let err: AppError = GrError::EmptyInput { mmin: 0.0, mmax: 1.0 }.into();
        assert_eq!(err.exit_code(), 3);

        let err: AppError = GrError::InvalidBins("width must be > 0".into()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("width must be > 0"));
    }
}
