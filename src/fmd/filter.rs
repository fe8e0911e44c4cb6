//! Magnitude range selection.

use crate::domain::MagnitudeSeries;
use crate::error::GrError;

/// Keep magnitudes in `[mmin, mmax]` (both inclusive) and sort them largest first.
///
/// NaN never passes the range test.
pub fn filter_magnitudes(raw: &[f64], mmin: f64, mmax: f64) -> Result<MagnitudeSeries, GrError> {
    let mut kept: Vec<f64> = raw
        .iter()
        .copied()
        .filter(|&v| mmin <= v && v <= mmax)
        .collect();

    if kept.is_empty() {
        return Err(GrError::EmptyInput { mmin, mmax });
    }

    // Stable sort keeps the original relative order among equal values.
    kept.sort_by(|a, b| b.total_cmp(a));
    Ok(MagnitudeSeries::from_sorted_desc(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bounds_are_inclusive() {
        let s = filter_magnitudes(&[0.5, 1.0, 2.0, 3.0, 3.5], 1.0, 3.0).unwrap();
        assert_eq!(s.as_slice(), &[3.0, 2.0, 1.0]);
        assert_eq!(s.max(), Some(3.0));
        assert_eq!(s.min(), Some(1.0));
    }

    #[test]
    fn nan_and_out_of_range_values_are_dropped() {
        let s = filter_magnitudes(&[f64::NAN, 2.0, f64::INFINITY], 0.0, 6.8).unwrap();
        assert_eq!(s.as_slice(), &[2.0]);
    }

    #[test]
    fn empty_result_is_an_error() {
        let err = filter_magnitudes(&[7.0, 8.0], 0.0, 6.8).unwrap_err();
        assert!(matches!(err, GrError::EmptyInput { .. }));
        assert!(filter_magnitudes(&[], 0.0, 6.8).is_err());
    }

    proptest! {
        #[test]
        fn output_is_in_range_subset_and_idempotent(
            raw in prop::collection::vec(-2.0f64..9.0, 1..200),
            mmin in -1.0f64..3.0,
            width in 0.0f64..5.0,
        ) {
            let mmax = mmin + width;
            if let Ok(once) = filter_magnitudes(&raw, mmin, mmax) {
                for v in once.as_slice() {
                    prop_assert!(mmin <= *v && *v <= mmax);
                    prop_assert!(raw.contains(v));
                }
                for w in once.as_slice().windows(2) {
                    prop_assert!(w[0] >= w[1]);
                }
                let twice = filter_magnitudes(once.as_slice(), mmin, mmax).unwrap();
                prop_assert_eq!(once, twice);
            } else {
                prop_assert!(raw.iter().all(|v| *v < mmin || *v > mmax));
            }
        }
    }
}
