//! End-to-end runs through the library: synthetic catalogue on disk, full
//! pipeline, exports, and reloading the results file.

use gr_bvalue::app::pipeline::run_pipeline;
use gr_bvalue::data::{SyntheticConfig, generate_catalogue};
use gr_bvalue::domain::{BinSpec, EstimationConfig, RunConfig};
use gr_bvalue::io::{ResultsFile, read_results_json, write_fmd_csv, write_magnitudes_csv, write_results_json};
use gr_bvalue::plot::render_fmd_plot;

fn synthetic(resolution: Option<f64>) -> Vec<f64> {
    generate_catalogue(&SyntheticConfig {
        n_events: 20_000,
        b_value: 1.0,
        mc: 1.5,
        floor: 0.5,
        resolution,
        seed: 42,
    })
    .unwrap()
}

fn run_config(catalogue: std::path::PathBuf, mc_list: Vec<f64>) -> RunConfig {
    RunConfig {
        catalogue,
        column: None,
        estimation: EstimationConfig {
            mmin: 0.0,
            mmax: 10.0,
            bins: BinSpec::Width(0.1),
            mc_list,
            nmin: Some(10),
        },
        plot: false,
        plot_width: 80,
        plot_height: 20,
        ylim: None,
        export_fmd: None,
        export_results: None,
    }
}

#[test]
fn regression_recovers_the_synthetic_b_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synthetic.csv");
    write_magnitudes_csv(&path, &synthetic(None)).unwrap();

    let out = run_pipeline(&run_config(path, vec![1.5])).unwrap();
    assert_eq!(out.run.n_events, 20_000);

    let fit = out.run.outcome(1.5).unwrap().result.as_ref().unwrap();
    assert!((fit.b_reg - 1.0).abs() < 0.15, "b_reg={}", fit.b_reg);
    assert!(fit.r_squared.unwrap() > 0.95);

    // The Maximum-Curvature Mc sits in the roll-off, at or below the true Mc.
    let mc = out.run.curvature.mc;
    assert!((0.5..=1.6).contains(&mc), "max-curvature Mc={mc}");
    assert!(out.run.completeness.contains(mc));
}

#[test]
fn exports_round_trip_and_replot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synthetic.csv");
    write_magnitudes_csv(&path, &synthetic(Some(0.1))).unwrap();

    let config = run_config(path.clone(), vec![0.0, 2.2, 9.5]);
    let out = run_pipeline(&config).unwrap();

    // Mc above every bin fails alone.
    assert!(out.run.outcome(9.5).unwrap().result.is_err());
    assert!(out.run.outcome(2.2).unwrap().result.is_ok());

    let fmd_path = dir.path().join("fmd.csv");
    write_fmd_csv(&fmd_path, &out.run.fmd, &out.run.curvature).unwrap();
    let fmd_text = std::fs::read_to_string(&fmd_path).unwrap();
    assert_eq!(fmd_text.lines().count(), out.run.fmd.len() + 1);

    let results_path = dir.path().join("results.json");
    let results = ResultsFile::from_run(&out.run, &config.estimation, Some(&path), None);
    write_results_json(&results_path, &results).unwrap();
    let back = read_results_json(&results_path).unwrap();

    assert_eq!(back.fmd, out.run.fmd);
    assert_eq!(back.completeness, out.run.completeness.as_slice());
    let failed = back.report(9.5).unwrap();
    assert!(failed.fit.is_none() && failed.error.is_some());

    let fit = back.report(2.2).unwrap().fit.as_ref().unwrap();
    let plot = render_fmd_plot(&back.fmd, Some(fit), back.config.mmin, back.ylim, 60, 15);
    assert!(plot.contains("Mc=2.2"));
}
