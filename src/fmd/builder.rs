//! Histogram and cumulative FMD construction.
//!
//! Binning rules:
//! - `BinSpec::Width(w)`: edges `min + k * w` for `k = 0, 1, ...` up to and
//!   including the first edge strictly greater than the maximum magnitude.
//! - `BinSpec::Count(n)`: `n` equal-width bins spanning exactly `[min, max]`.
//!
//! Every bin is half-open `[e_k, e_{k+1})` except the last, which is closed so
//! that a value sitting on the final edge is still counted.

use crate::domain::{BinSpec, Fmd, Histogram, MagnitudeSeries};
use crate::error::GrError;

/// Upper bound on the number of bins a width specification may produce.
const MAX_BINS: usize = 1_000_000;

/// Bin a filtered series and derive the cumulative FMD.
pub fn build_fmd(series: &MagnitudeSeries, bins: BinSpec) -> Result<(Histogram, Fmd), GrError> {
    let (Some(min), Some(max)) = (series.min(), series.max()) else {
        return Err(GrError::InvalidBins("cannot bin an empty series".to_string()));
    };
    if min == max {
        return Err(GrError::DegenerateRange { value: min });
    }

    let edges = bin_edges(min, max, bins)?;
    let histogram = histogram(series.as_slice(), edges);
    let fmd = cumulative_fmd(&histogram);
    Ok((histogram, fmd))
}

/// Compute bin edges for `[min, max]` (requires `min < max`).
pub fn bin_edges(min: f64, max: f64, bins: BinSpec) -> Result<Vec<f64>, GrError> {
    match bins {
        BinSpec::Width(width) => {
            if !(width.is_finite() && width > 0.0) {
                return Err(GrError::InvalidBins(format!("width must be finite and > 0 (got {width})")));
            }
            let expected = ((max - min) / width).floor() + 2.0;
            if !(expected.is_finite() && expected <= MAX_BINS as f64 + 1.0) {
                return Err(GrError::InvalidBins(format!(
                    "width {width} over [{min}, {max}] yields more than {MAX_BINS} bins"
                )));
            }

            let mut edges = vec![min];
            let mut k = 1usize;
            loop {
                let edge = min + k as f64 * width;
                edges.push(edge);
                if edge > max {
                    break;
                }
                k += 1;
            }
            Ok(edges)
        }
        BinSpec::Count(n) => {
            if n == 0 || n > MAX_BINS {
                return Err(GrError::InvalidBins(format!("bin count must be in 1..={MAX_BINS} (got {n})")));
            }
            let step = (max - min) / n as f64;
            let mut edges: Vec<f64> = (0..=n).map(|k| min + k as f64 * step).collect();
            // Pin the final edge so the maximum always falls inside the last bin.
            edges[n] = max;
            Ok(edges)
        }
    }
}

/// Count values into the bins described by `edges`.
///
/// Values outside `[edges[0], edges[last]]` are ignored.
pub fn histogram(values: &[f64], edges: Vec<f64>) -> Histogram {
    let n_bins = edges.len().saturating_sub(1);
    let mut counts = vec![0u64; n_bins];
    if n_bins == 0 {
        return Histogram { edges, counts };
    }

    let first = edges[0];
    let last = edges[n_bins];
    for &v in values {
        if !(first <= v && v <= last) {
            continue;
        }
        // Number of edges <= v; the bin index is one less.
        let idx = edges.partition_point(|e| *e <= v).saturating_sub(1).min(n_bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

/// Reverse cumulative sum over the histogram: `gr_freq[i] = Σ counts[i..]`.
pub fn cumulative_fmd(hist: &Histogram) -> Fmd {
    let mut gr_freq = vec![0u64; hist.counts.len()];
    let mut running = 0u64;
    for (i, &c) in hist.counts.iter().enumerate().rev() {
        running += c;
        gr_freq[i] = running;
    }

    let gr_mag = hist.edges[..hist.counts.len()].to_vec();
    let bin_width = match hist.edges.as_slice() {
        [e0, e1, ..] => e1 - e0,
        _ => 0.0,
    };

    Fmd {
        gr_mag,
        gr_freq,
        discrete: hist.counts.clone(),
        bin_width,
    }
}

/// Recover per-bin counts from a cumulative series by differencing.
pub fn discrete_from_cumulative(gr_freq: &[u64]) -> Vec<u64> {
    gr_freq
        .iter()
        .enumerate()
        .map(|(i, &n)| n.saturating_sub(gr_freq.get(i + 1).copied().unwrap_or(0)))
        .collect()
}
