//! Evenly spaced grids and decimal rounding.
//!
//! `arange` follows the half-open convention `[start, stop)`: the number of
//! points is `ceil((stop - start) / step)` and point `i` is `start + i * step`.

use crate::error::GrError;

/// Evenly spaced points over `[start, stop)`.
///
/// Floating-point rounding in the point count can place the last point within
/// rounding error of `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, GrError> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite() && step > 0.0) {
        return Err(GrError::InvalidBins(format!(
            "invalid grid: start={start}, stop={stop}, step={step}"
        )));
    }
    if stop <= start {
        return Ok(Vec::new());
    }

    let n = ((stop - start) / step).ceil() as usize;
    Ok((0..n).map(|i| start + i as f64 * step).collect())
}

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arange_excludes_stop() {
        let v = arange(1.0, 2.0, 0.25).unwrap();
        assert_eq!(v, vec![1.0, 1.25, 1.5, 1.75]);
    }

    #[test]
    fn arange_empty_when_stop_not_above_start() {
        assert!(arange(2.0, 2.0, 0.1).unwrap().is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round_to(1.2345, 1), 1.2);
        assert_eq!(round_to(2.25, 1), 2.2);
        assert_eq!(round_to(-0.06, 1), -0.1);
    }
}
