//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the estimation pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SynthArgs};
use crate::data::{SyntheticConfig, generate_catalogue};
use crate::domain::{EstimationConfig, RunConfig};
use crate::error::AppError;
use crate::io::{ResultsFile, read_results_json, write_fmd_csv, write_magnitudes_csv, write_results_json};
use crate::plot::{render_curvature_plot, render_fmd_plot};
use crate::report::{format_curvature, format_fmd_table, format_mc_report, format_run_summary};

pub mod pipeline;

/// Entry point for the `bvalue` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Fmd(args) => handle_fit(args, OutputMode::FmdOnly),
        Command::Plot(args) => handle_plot(args),
        Command::Synth(args) => handle_synth(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    FmdOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let output = pipeline::run_pipeline(&config)?;
    let run = &output.run;

    match mode {
        OutputMode::Full => {
            println!("{}", format_run_summary(&output.catalogue, run, &config.estimation));
        }
        OutputMode::FmdOnly => {
            println!("{}", format_fmd_table(&run.fmd, &run.curvature));
            println!("{}", format_curvature(&run.curvature));
        }
    }

    if config.plot {
        println!("{}", render_curvature_plot(&run.curvature, config.plot_width, config.plot_height));
        match mode {
            OutputMode::Full => {
                for fit in run.fits() {
                    println!(
                        "{}",
                        render_fmd_plot(
                            &run.fmd,
                            Some(fit),
                            config.estimation.mmin,
                            config.ylim,
                            config.plot_width,
                            config.plot_height
                        )
                    );
                }
            }
            OutputMode::FmdOnly => {
                println!(
                    "{}",
                    render_fmd_plot(
                        &run.fmd,
                        None,
                        config.estimation.mmin,
                        config.ylim,
                        config.plot_width,
                        config.plot_height
                    )
                );
            }
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_fmd {
        write_fmd_csv(path, &run.fmd, &run.curvature)?;
        log::info!("wrote FMD table to '{}'", path.display());
    }
    if let Some(path) = &config.export_results {
        let results = ResultsFile::from_run(run, &config.estimation, Some(&config.catalogue), config.ylim);
        write_results_json(path, &results)?;
        log::info!("wrote results to '{}'", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let results = read_results_json(&args.results)?;
    let ylim = args.ylim.or(results.ylim);

    let reports: Vec<_> = match args.mc {
        Some(mc) => {
            let report = results.report(mc).ok_or_else(|| {
                AppError::new(3, format!("No report for Mc={mc} in '{}'.", args.results.display()))
            })?;
            vec![report]
        }
        None => results.reports.iter().collect(),
    };

    println!("{}", render_curvature_plot(&results.curvature, args.width, args.height));
    for report in reports {
        print!("{}", format_mc_report(report));
        if let Some(fit) = &report.fit {
            println!(
                "{}",
                render_fmd_plot(&results.fmd, Some(fit), results.config.mmin, ylim, args.width, args.height)
            );
        }
    }
    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let config = synthetic_config_from_args(&args);
    let magnitudes = generate_catalogue(&config)?;
    write_magnitudes_csv(&args.out, &magnitudes)?;
    println!("Wrote {} synthetic magnitudes to {}", magnitudes.len(), args.out.display());
    Ok(())
}

pub fn config_from_args(args: &FitArgs) -> RunConfig {
    RunConfig {
        catalogue: args.catalogue.clone(),
        column: args.column.clone(),
        estimation: EstimationConfig {
            mmin: args.mmin,
            mmax: args.mmax,
            bins: args.mbins,
            mc_list: args.mc.clone(),
            nmin: (args.nmin > 0).then_some(args.nmin),
        },
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        ylim: args.ylim,
        export_fmd: args.export_fmd.clone(),
        export_results: args.export_results.clone(),
    }
}

pub fn synthetic_config_from_args(args: &SynthArgs) -> SyntheticConfig {
    SyntheticConfig {
        n_events: args.n,
        b_value: args.b,
        mc: args.mc,
        floor: args.floor,
        resolution: (args.resolution != 0.0).then_some(args.resolution),
        seed: args.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::{BinSpec, YLim};

    fn fit_args(argv: &[&str]) -> FitArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Fit(args) | Command::Fmd(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn defaults_match_estimation_defaults() {
        let config = config_from_args(&fit_args(&["bvalue", "fit", "cat.csv"]));
        assert_eq!(config.estimation, EstimationConfig::default());
        assert!(config.plot);
        assert!(config.ylim.is_none());
    }

    #[test]
    fn flags_map_onto_run_config() {
        let args = fit_args(&[
            "bvalue", "fmd", "cat.csv", "--mbins", "20", "--mc", "1.0", "--mc", "1.5", "--nmin", "0", "--ylim",
            "0,30000", "--no-plot",
        ]);
        let config = config_from_args(&args);
        assert_eq!(config.estimation.bins, BinSpec::Count(20));
        assert_eq!(config.estimation.mc_list, vec![1.0, 1.5]);
        assert_eq!(config.estimation.nmin, None);
        assert_eq!(config.ylim, Some(YLim { lo: 0.0, hi: 30000.0 }));
        assert!(!config.plot);
    }

    #[test]
    fn zero_resolution_keeps_full_precision() {
        let cli = Cli::try_parse_from(["bvalue", "synth", "--out", "x.csv", "--resolution", "0"]).unwrap();
        let Command::Synth(args) = cli.command else {
            panic!("expected synth");
        };
        let config = synthetic_config_from_args(&args);
        assert_eq!(config.resolution, None);
        assert_eq!(config.n_events, 10_000);
    }
}
