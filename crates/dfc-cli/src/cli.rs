//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dfc",
    version,
    about = "Compare field distributions across tabular datasets",
    long_about = "Compare field distributions across tabular datasets.\n\n\
                  Column names are standardized through configured aliases and fuzzy\n\
                  matching, then every shared field is tested with Kolmogorov-Smirnov,\n\
                  Kruskal-Wallis, Anderson-Darling or chi-square tests."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two or more data files.
    Compare(CompareArgs),

    /// List the standard fields defined in a configuration file.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Data files (CSV, TSV, Parquet, JSON), or directories containing them.
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Field mapping configuration (TOML or JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset names, in file order (default: file stems).
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Significance level (overrides the configuration file).
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Minimum fuzzy match similarity (overrides the configuration file).
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Report title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Write the full report as JSON.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Field mapping configuration (TOML or JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
