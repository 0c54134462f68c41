use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Motorflux Developers",
    version,
    about = "motorflux - Directional flux of protein dihedrals driven by substrate binding and catalysis, computed from unbound and bound population histograms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate one dihedral and print its flux report.
    Simulate(SimulateArgs),
    /// Simulate many dihedrals of a data set and write a summary table.
    Batch(BatchArgs),
}

/// Model options shared by `simulate` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Input Selection ---
    /// Data set providing the histograms and intersurface presets
    /// (pka, pka-reversed, adk, hiv, manual).
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Directory containing the data set directories (e.g., 'pka-md-data').
    #[arg(long, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Unbound histogram file, bypassing the data set layout.
    #[arg(long, value_name = "PATH", requires = "bound")]
    pub unbound: Option<PathBuf>,

    /// Bound histogram file, bypassing the data set layout.
    #[arg(long, value_name = "PATH", requires = "unbound")]
    pub bound: Option<PathBuf>,

    /// Format of explicit input files (comma, columns).
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Treat explicit input files as free energies in kcal/mol instead of populations.
    #[arg(long)]
    pub energies: bool,

    // --- Model Overrides ---
    /// Thermal energy kT in kcal/mol.
    #[arg(long, value_name = "FLOAT")]
    pub kt: Option<f64>,

    /// Intrasurface diffusion coefficient in degrees² per second.
    #[arg(long, value_name = "FLOAT")]
    pub diffusion: Option<f64>,

    /// Applied load in kcal/mol per cycle.
    #[arg(long = "load", value_name = "FLOAT", allow_hyphen_values = true)]
    pub load_slope: Option<f64>,

    /// Number of propagation steps of an initial population (0 disables).
    #[arg(long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S intersurface.catalytic-rate=100
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Dihedral name within the data set (e.g., 'chi1ALA13').
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Write the per-bin energies, populations and fluxes as CSV.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Comma-separated dihedral names. Discovered from the data root when omitted.
    #[arg(long, value_name = "NAMES", conflicts_with = "names_file")]
    pub names: Option<String>,

    /// File listing one dihedral name per line ('#' starts a comment).
    #[arg(long, value_name = "PATH")]
    pub names_file: Option<PathBuf>,

    /// Write the summary table as CSV instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the per-bin CSV of every dihedral into this directory.
    #[arg(long, value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}
