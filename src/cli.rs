use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Multi-order Markov models for path data.
#[derive(Parser)]
#[command(
    name = "pathorder",
    version,
    about = "Fit multi-order Markov models to paths and select the optimal order"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit layers 1..=max_order and report per-layer statistics.
    Fit(FitArgs),
    /// Run one likelihood-ratio test between two orders.
    Test(TestArgs),
    /// Select the lowest sufficient order by iterated likelihood-ratio tests.
    Select(SelectArgs),
    /// Draw a random walk from a fitted model.
    Simulate(SimulateArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to TOML file with the paths and model settings.
    #[arg(short, long, default_value = "pathorder.toml")]
    pub config: PathBuf,

    /// Multiply every path weight by this factor.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Write JSON output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `fit` subcommand.
#[derive(clap::Args)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Override [model].max_order from config.
    #[arg(long)]
    pub max_order: Option<usize>,

    /// Include every layer's transition matrix and its null projection.
    #[arg(long)]
    pub matrices: bool,
}

/// Arguments for the `test` subcommand.
#[derive(clap::Args)]
pub struct TestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Order of the null model.
    #[arg(long = "null")]
    pub null_order: usize,

    /// Order of the alternative model.
    #[arg(long = "alt")]
    pub alt_order: usize,
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Override [model].max_order from config.
    #[arg(long)]
    pub max_order: Option<usize>,

    /// Override [model].significance_level from config.
    #[arg(long)]
    pub alpha: Option<f64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Order of the model to draw from.
    #[arg(long)]
    pub order: usize,

    /// Maximum number of symbols to draw.
    #[arg(long, default_value_t = 20)]
    pub steps: usize,

    /// Override [model].seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Comma-separated start context (defaults to the model's first context).
    #[arg(long)]
    pub start: Option<String>,
}
