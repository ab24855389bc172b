//! CLI argument parsing for scoresplit
//!
//! Global flags: --root, --config, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AllocateArgs, ConfigCommands, ConfigSubcommand, ExportArgs, RosterArgs};
pub use scoresplit_core::format::OutputFormat;

use parse::parse_output_format;

/// Scoresplit - split exam totals into plausible per-subject scores
#[derive(Parser, Debug)]
#[command(name = "scoresplit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for config discovery and relative paths
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file (default: ./scoresplit.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human, json, or records
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. debug, scoresplit_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level scoresplit commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a single total across subjects
    Allocate(AllocateArgs),

    /// Generate scores for every student on a roster and print them
    Preview(RosterArgs),

    /// Generate scores for a roster and write them to a CSV file
    Export(ExportArgs),

    /// Show or create the configuration file
    Config(ConfigSubcommand),
}
