//! Discrete derivative of a sampled function on a (possibly) non-uniform grid.
//!
//! Interior points use the second-order accurate central difference for uneven
//! spacing:
//!
//! ```text
//! f'(x_i) ≈ -h2 / (h1 (h1 + h2)) f_{i-1} + (h2 - h1) / (h1 h2) f_i + h1 / (h2 (h1 + h2)) f_{i+1}
//! ```
//!
//! with `h1 = x_i - x_{i-1}` and `h2 = x_{i+1} - x_i`. The two end points use
//! first-order one-sided differences. For uniform spacing the interior formula
//! reduces to `(f_{i+1} - f_{i-1}) / 2h`.

/// Numerical gradient of `f` with respect to `x`.
///
/// Returns an empty vector for empty input and `[0.0]` for a single sample.
///
/// # Panics
/// Panics if `f` and `x` have different lengths.
pub fn gradient(f: &[f64], x: &[f64]) -> Vec<f64> {
    assert_eq!(f.len(), x.len(), "gradient: f and x must have equal length");
    let n = f.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![0.0],
        _ => {}
    }

    let mut out = vec![0.0; n];
    out[0] = (f[1] - f[0]) / (x[1] - x[0]);
    out[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let h1 = x[i] - x[i - 1];
        let h2 = x[i + 1] - x[i];
        let a = -h2 / (h1 * (h1 + h2));
        let b = (h2 - h1) / (h1 * h2);
        let c = h1 / (h2 * (h1 + h2));
        out[i] = a * f[i - 1] + b * f[i] + c * f[i + 1];
    }

    out
}

/// Index of the first maximum; `None` for empty input or if every value is NaN.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
