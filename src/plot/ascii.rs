//! ASCII plotting for terminal output.
//!
//! Fixed-size character grids, deterministic so they can be snapshot-tested.
//! Both plots use a log10 y axis.
//!
//! FMD plot elements:
//! - cumulative counts: `o`
//! - discrete counts: `+`
//! - least-squares line: `-`
//! - maximum-likelihood line: `~`
//! - ±2σ regression band: `:`
//! - completeness magnitude: `|`

use crate::domain::{CurvatureCurve, FitResult, Fmd, YLim};

/// Render the FMD with an optional fit overlaid.
///
/// `ylim` is given in event counts. A non-positive bound falls back to the
/// data range on that side. The Mc marker is omitted when Mc equals the
/// lower magnitude bound `mmin`. The ±2σ band is omitted when it is narrower
/// than half a plot row.
pub fn render_fmd_plot(
    fmd: &Fmd,
    fit: Option<&FitResult>,
    mmin: f64,
    ylim: Option<YLim>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let cumulative = log_points(&fmd.gr_mag, fmd.gr_freq.iter().map(|&n| n as f64));
    let discrete = log_points(&fmd.gr_mag, fmd.discrete.iter().map(|&n| n as f64));

    // Curves in priority order: earlier curves are not overwritten by later ones.
    let mut curves: Vec<(Vec<(f64, f64)>, char)> = Vec::new();
    let mut band_curves: Vec<Vec<(f64, f64)>> = Vec::new();
    if let Some(fit) = fit {
        let band = &fit.band;
        curves.push((zip_points(&band.xpredict, &band.ypredict_reg), '-'));
        curves.push((zip_points(&band.xpredict, &band.ypredict_ml), '~'));
        for side in [&band.lower, &band.upper].into_iter().flatten() {
            band_curves.push(zip_points(&band.xpredict, side));
        }
    }

    let all_curves = || curves.iter().map(|(c, _)| c).chain(&band_curves);

    let xs = fmd
        .gr_mag
        .iter()
        .copied()
        .chain(all_curves().flat_map(|c| c.iter().map(|&(x, _)| x)));
    let (x_min, x_max) = span(xs).unwrap_or((0.0, 1.0));

    let ys = cumulative
        .iter()
        .chain(&discrete)
        .map(|&(_, y)| y)
        .chain(all_curves().flat_map(|c| c.iter().map(|&(_, y)| y)));
    let (y_min, y_max) = span(ys).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = apply_ylim(pad_range(y_min, y_max, 0.05), ylim);

    let row_step = (y_max - y_min) / (height as f64 - 1.0);
    let show_band = fit
        .and_then(|f| f.sigma)
        .is_some_and(|s| 2.0 * s >= 0.5 * row_step);
    let show_marker = fit.is_some_and(|f| f.mc != mmin);

    let mut grid = vec![vec![' '; width]; height];
    for (curve, ch) in &curves {
        draw_curve(&mut grid, curve, *ch, x_min, x_max, y_min, y_max);
    }
    if show_band {
        for curve in &band_curves {
            draw_curve(&mut grid, curve, ':', x_min, x_max, y_min, y_max);
        }
    }
    if let Some(fit) = fit.filter(|_| show_marker) {
        draw_marker(&mut grid, fit.mc, x_min, x_max);
    }
    plot_points(&mut grid, &discrete, '+', x_min, x_max, y_min, y_max);
    plot_points(&mut grid, &cumulative, 'o', x_min, x_max, y_min, y_max);

    let mut out = String::new();
    out.push_str(&format!(
        "FMD: M=[{x_min:.2}, {x_max:.2}] | log10 N=[{y_min:.2}, {y_max:.2}]\n"
    ));
    push_grid(&mut out, grid);

    let mut legend = String::from("o cumulative  + discrete");
    if let Some(fit) = fit {
        legend.push_str(&format!("  - LS (b={:.2})  ~ MLE (b={:.2})", fit.b_reg, fit.b_ml));
        if show_band {
            legend.push_str("  : ±2σ");
        }
        if show_marker {
            legend.push_str(&format!("  | Mc={:.1}", fit.mc));
        }
    }
    out.push_str(&legend);
    out.push('\n');

    out
}

/// Render |dN/dM| against magnitude with the selected Mc marked.
pub fn render_curvature_plot(curvature: &CurvatureCurve, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points = log_points(&curvature.magnitudes, curvature.abs_gradient.iter().copied());
    let (x_min, x_max) = span(curvature.magnitudes.iter().copied()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = span(points.iter().map(|&(_, y)| y)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    draw_curve(&mut grid, &points, '-', x_min, x_max, y_min, y_max);
    draw_marker(&mut grid, curvature.mc, x_min, x_max);
    plot_points(&mut grid, &points, '*', x_min, x_max, y_min, y_max);

    let mut out = String::new();
    out.push_str(&format!(
        "Max curvature: M=[{x_min:.2}, {x_max:.2}] | log10|dN/dM|=[{y_min:.2}, {y_max:.2}] | Mc={:.1}\n",
        curvature.mc
    ));
    push_grid(&mut out, grid);
    out
}

/// `(x, log10 v)` for strictly positive values.
fn log_points(xs: &[f64], values: impl Iterator<Item = f64>) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(values)
        .filter(|&(_, v)| v > 0.0 && v.is_finite())
        .map(|(&x, v)| (x, v.log10()))
        .collect()
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Min and max of the finite values; a single value is widened by ±0.5.
fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if !(min_v.is_finite() && max_v.is_finite()) {
        return None;
    }
    if max_v > min_v {
        Some((min_v, max_v))
    } else {
        Some((min_v - 0.5, max_v + 0.5))
    }
}

fn apply_ylim(data: (f64, f64), ylim: Option<YLim>) -> (f64, f64) {
    let Some(lim) = ylim else {
        return data;
    };
    let lo = if lim.lo > 0.0 { lim.lo.log10() } else { data.0 };
    let hi = if lim.hi > 0.0 { lim.hi.log10() } else { data.1 };
    if hi > lo { (lo, hi) } else { data }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn plot_points(grid: &mut [Vec<char>], points: &[(f64, f64)], ch: char, x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();
    for &(x, y) in points {
        if y < y_min || y > y_max {
            continue;
        }
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = ch;
    }
}

/// Vertical marker at magnitude `x`, drawn only on blank cells.
fn draw_marker(grid: &mut [Vec<char>], x: f64, x_min: f64, x_max: f64) {
    if !(x_min <= x && x <= x_max) {
        return;
    }
    let col = map_x(x, x_min, x_max, grid[0].len());
    for row in grid.iter_mut() {
        if row[col] == ' ' {
            row[col] = '|';
        }
    }
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], ch: char, x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
