//! Command-line parsing for the b-value estimator.
//!
//! Argument parsing and command dispatch stay separate from the estimation
//! code. Every numeric option can also be set through a `BVALUE_*`
//! environment variable (or a `.env` file).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{BinSpec, YLim};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bvalue", version, about = "Gutenberg-Richter b-value estimation from earthquake catalogues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a and b for every completeness magnitude, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Print the FMD table and the Maximum-Curvature Mc only.
    Fmd(FitArgs),
    /// Re-render plots from a results JSON written by `bvalue fit --export-results`.
    Plot(PlotArgs),
    /// Write a synthetic Gutenberg-Richter catalogue.
    Synth(SynthArgs),
}

/// Options for estimation runs.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Catalogue file (`.cat` whitespace table or CSV).
    #[arg(value_name = "CATALOGUE")]
    pub catalogue: PathBuf,

    /// Magnitude column name (default: `Mag` / `Magnitude`).
    #[arg(long, env = "BVALUE_COLUMN")]
    pub column: Option<String>,

    /// Lowest magnitude kept.
    #[arg(long, default_value_t = 0.0, env = "BVALUE_MMIN", allow_negative_numbers = true)]
    pub mmin: f64,

    /// Highest magnitude kept.
    #[arg(long, default_value_t = 6.8, env = "BVALUE_MMAX", allow_negative_numbers = true)]
    pub mmax: f64,

    /// Bin width (`0.1`) or bin count (`20`).
    #[arg(long, default_value = "0.1", env = "BVALUE_MBINS")]
    pub mbins: BinSpec,

    /// Completeness magnitude to fit (repeatable; the Maximum-Curvature Mc is always added).
    #[arg(
        long = "mc",
        default_values_t = [0.0, 2.2],
        env = "BVALUE_MC",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub mc: Vec<f64>,

    /// Minimum cumulative count for regression points (0 disables).
    #[arg(long, default_value_t = 5, env = "BVALUE_NMIN")]
    pub nmin: u64,

    /// FMD plot y range in event counts, `LO,HI`.
    #[arg(long, env = "BVALUE_YLIM", allow_hyphen_values = true)]
    pub ylim: Option<YLim>,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the FMD table to CSV.
    #[arg(long = "export-fmd")]
    pub export_fmd: Option<PathBuf>,

    /// Export the full run (FMD, curvature, per-Mc fits) to JSON.
    #[arg(long = "export-results")]
    pub export_results: Option<PathBuf>,
}

/// Options for plotting saved results.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Results JSON file produced by `bvalue fit --export-results`.
    #[arg(long, value_name = "JSON")]
    pub results: PathBuf,

    /// Only plot this completeness magnitude.
    #[arg(long, allow_negative_numbers = true)]
    pub mc: Option<f64>,

    /// Override the y range stored in the results file.
    #[arg(long, allow_hyphen_values = true)]
    pub ylim: Option<YLim>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic catalogue generation.
#[derive(Debug, Parser)]
pub struct SynthArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of events.
    #[arg(short = 'n', long, default_value_t = 10_000, env = "BVALUE_SYNTH_N")]
    pub n: usize,

    /// True b-value.
    #[arg(long, default_value_t = 1.0, env = "BVALUE_SYNTH_B")]
    pub b: f64,

    /// True completeness magnitude.
    #[arg(long, default_value_t = 1.5, env = "BVALUE_SYNTH_MC", allow_negative_numbers = true)]
    pub mc: f64,

    /// Smallest generated magnitude.
    #[arg(long, default_value_t = 0.5, env = "BVALUE_SYNTH_FLOOR", allow_negative_numbers = true)]
    pub floor: f64,

    /// Reporting resolution (0 keeps full precision).
    #[arg(long, default_value_t = 0.1, env = "BVALUE_SYNTH_RESOLUTION")]
    pub resolution: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42, env = "BVALUE_SYNTH_SEED")]
    pub seed: u64,
}
