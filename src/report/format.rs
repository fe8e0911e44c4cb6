//! Formatted terminal output.
//!
//! Formatting lives here so the estimation code stays free of presentation
//! concerns and output changes stay in one place.

use crate::domain::{CurvatureCurve, EstimationConfig, Fmd};
use crate::fit::EstimationRun;
use crate::io::{Catalogue, McReport};

/// Dataset summary, FMD table, Maximum-Curvature result and per-Mc blocks.
pub fn format_run_summary(catalogue: &Catalogue, run: &EstimationRun, config: &EstimationConfig) -> String {
    let mut out = String::new();

    out.push_str("=== bvalue - Gutenberg-Richter b-value estimation ===\n");
    out.push_str(&format!(
        "Catalogue: {} rows read | {} magnitudes (column `{}`) | {} rows skipped\n",
        catalogue.rows_read,
        catalogue.magnitudes.len(),
        catalogue.column,
        catalogue.row_errors.len()
    ));
    out.push_str(&format_config(config));
    out.push_str(&format!("Events in range: {}\n", run.n_events));
    out.push('\n');

    out.push_str(&format_fmd_table(&run.fmd, &run.curvature));
    out.push('\n');
    out.push_str(&format_curvature(&run.curvature));
    out.push('\n');

    for outcome in &run.outcomes {
        out.push_str(&format_mc_report(&McReport::from(outcome)));
    }

    out
}

/// One line echoing the estimation settings.
pub fn format_config(config: &EstimationConfig) -> String {
    let nmin = match config.nmin {
        Some(n) if n > 0 => n.to_string(),
        _ => "off".to_string(),
    };
    format!(
        "Range: [{}, {}] | bins: {} | Mc list: {} | nmin: {nmin}\n",
        config.mmin,
        config.mmax,
        config.bins,
        fmt_vec(&config.mc_list, 2)
    )
}

/// Per-bin FMD table; the Maximum-Curvature bin is flagged.
pub fn format_fmd_table(fmd: &Fmd, curvature: &CurvatureCurve) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "FMD ({} bins, width {:.4}, {} events):\n",
        fmd.len(),
        fmd.bin_width,
        fmd.total_events()
    ));
    out.push_str(
        format!("{:>10} {:>10} {:>12} {:>12}", "magnitude", "discrete", "cumulative", "|dN/dM|").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<10} {:-<12} {:-<12}", "", "", "", "").trim_end());
    out.push('\n');

    for i in 0..fmd.len() {
        let grad = curvature
            .abs_gradient
            .get(i)
            .map(|g| format!("{g:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        let marker = if i == curvature.peak_index { "  <- max curvature" } else { "" };
        out.push_str(
            format!(
                "{:>10.2} {:>10} {:>12} {:>12}{marker}",
                fmd.gr_mag[i], fmd.discrete[i], fmd.gr_freq[i], grad
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

pub fn format_curvature(curvature: &CurvatureCurve) -> String {
    format!(
        "Maximum-Curvature: peak |dN/dM|={:.2} at M={:.2} -> Mc={:.1}\n",
        curvature.abs_gradient.get(curvature.peak_index).copied().unwrap_or(f64::NAN),
        curvature.peak_magnitude(),
        curvature.mc
    )
}

/// Fit block for one completeness magnitude, or its failure reason.
pub fn format_mc_report(report: &McReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(">> working on Mc={:?}\n", report.mc));

    match (&report.fit, &report.error) {
        (Some(fit), _) => {
            out.push_str(&format!("   ML : a={:.4} b={:.4}\n", fit.a_ml, fit.b_ml));
            out.push_str(&format!(
                "   LS : log N = {:.2} - {:.2} M [R^2={}]\n",
                fit.a_reg,
                fit.b_reg,
                fit.r_squared_percent()
                    .map(|r| format!("{r:.1}%"))
                    .unwrap_or_else(|| "n/a".to_string())
            ));
            out.push_str(&format!(
                "        δa={} δb={} σ={} n={}\n",
                fmt_opt(fit.a_se, 4),
                fmt_opt(fit.b_se, 4),
                fmt_opt(fit.sigma, 4),
                fit.n_obs
            ));
        }
        (None, Some(err)) => out.push_str(&format!("   skipped: {err}\n")),
        (None, None) => out.push_str("   no result\n"),
    }

    out
}

fn fmt_opt(v: Option<f64>, prec: usize) -> String {
    v.map(|x| format!("{x:.prec$}")).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_vec(v: &[f64], prec: usize) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.prec$}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BinSpec;
    use crate::fit::run_estimation;
    use crate::io::CatalogueFormat;

    const SCENARIO: [f64; 11] = [1.0, 1.0, 1.1, 1.2, 2.0, 2.0, 2.1, 3.0, 3.0, 3.0, 4.5];

    fn scenario() -> (Catalogue, EstimationRun, EstimationConfig) {
        let config = EstimationConfig {
            mmin: 0.0,
            mmax: 5.0,
            bins: BinSpec::Width(0.5),
            mc_list: vec![1.0, 6.0],
            nmin: None,
        };
        let run = run_estimation(&SCENARIO, &config).unwrap();
        let catalogue = Catalogue {
            format: CatalogueFormat::Csv,
            column: "Magnitude".to_string(),
            magnitudes: SCENARIO.to_vec(),
            row_errors: Vec::new(),
            rows_read: SCENARIO.len(),
        };
        (catalogue, run, config)
    }

    #[test]
    fn summary_lists_every_mc() {
        let (catalogue, run, config) = scenario();
        let txt = format_run_summary(&catalogue, &run, &config);

        assert!(txt.contains("11 magnitudes (column `Magnitude`)"));
        assert!(txt.contains(">> working on Mc=1.0\n"));
        assert!(txt.contains(">> working on Mc=6.0\n"));
        assert!(txt.contains("skipped: Insufficient data at Mc=6.00"));
        assert!(txt.contains("log N = "));
        assert!(txt.contains("<- max curvature"));
    }

    #[test]
    fn fmd_table_has_one_row_per_bin() {
        let (_, run, _) = scenario();
        let txt = format_fmd_table(&run.fmd, &run.curvature);
        // title + header + rule + 8 bins
        assert_eq!(txt.lines().count(), 3 + 8);
        assert!(txt.lines().nth(3).unwrap().starts_with("      1.00          4           11"));
        assert!(txt.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn undefined_statistics_print_as_na() {
        let (_, run, _) = scenario();
        let mut report = McReport::from(run.outcome(1.0).unwrap());
        let fit = report.fit.as_mut().unwrap();
        fit.a_se = None;
        fit.r_squared = None;

        let txt = format_mc_report(&report);
        assert!(txt.contains("[R^2=n/a]"));
        assert!(txt.contains("δa=n/a"));
    }

    #[test]
    fn config_line_shows_disabled_nmin() {
        let (_, _, config) = scenario();
        let line = format_config(&config);
        assert!(line.contains("nmin: off"));
        assert!(line.contains("Mc list: [1.00, 6.00]"));
    }
}
