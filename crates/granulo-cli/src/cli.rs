//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use granulo_core::SieveEntry;

/// Granulo - sieve analysis and soil threshold classification
#[derive(Parser, Debug)]
#[command(name = "granulo")]
#[command(author, version, about = "Sieve analysis and soil threshold classification", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "GRANULO_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a gradation table, mass balance and fines split
    Gradation(GradationArgs),
    /// Classify a soil from its Atterberg limits and #200 fines
    Classify(ClassifyArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Inspect or edit the configuration file
    Config {
        /// Config operation
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Output format for gradation reports.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width table with a summary
    #[default]
    Table,
    /// Pretty JSON
    Json,
    /// CSV rows
    Csv,
}

/// Output format for classifications.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClassifyFormat {
    /// One label per line
    #[default]
    Table,
    /// Pretty JSON, same shape as `POST /calcular`
    Json,
}

/// Arguments of `granulo gradation`.
///
/// Without `--input` or `--sieve`, the standard sieve stack is used.
#[derive(Args, Debug, Default)]
pub struct GradationArgs {
    /// TOML or JSON file with `total_mass` and `sieves`
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Total dry sample mass in grams
    #[arg(short = 'm', long)]
    pub total_mass: Option<f64>,

    /// Extra sieve, repeatable
    #[arg(short, long = "sieve", value_name = "NAME:OPENING_MM[:MASS]")]
    pub sieves: Vec<SieveEntry>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments of `granulo classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Liquid limit (%)
    #[arg(long)]
    pub ll: f64,

    /// Plastic limit (%); IP is derived as LL - LP
    #[arg(long)]
    pub lp: Option<f64>,

    /// Plasticity index (%)
    #[arg(long)]
    pub ip: Option<f64>,

    /// Percent passing the #200 sieve
    #[arg(long = "passing-200", alias = "passa-200")]
    pub passing_200: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ClassifyFormat::Table)]
    pub format: ClassifyFormat,
}

/// Arguments of `granulo serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// `granulo config` operations.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Print a value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
