//! Command argument structures

use std::path::PathBuf;

use clap::{Args, Subcommand};
use scoresplit_core::config::AllocConfig;
use scoresplit_core::seed::SeedPolicy;

use super::parse::{parse_fraction, parse_seed_policy};

/// Allocation knobs shared by every allocating command.
/// Unset flags fall back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Minimum score for every subject
    #[arg(long, allow_negative_numbers = true)]
    pub min_each: Option<i64>,

    /// Per-subject cap as a fraction of the total, in (0, 1] (weighted mode)
    #[arg(long, value_parser = parse_fraction)]
    pub max_fraction: Option<f64>,

    /// Noise intensity (0 disables variation)
    #[arg(long, allow_negative_numbers = true)]
    pub randomness: Option<f64>,
}

impl TuningArgs {
    /// Override config defaults with any flags that were given
    pub fn apply(&self, config: &mut AllocConfig) {
        if let Some(min_each) = self.min_each {
            config.min_each = min_each;
        }
        if let Some(fraction) = self.max_fraction {
            config.max_each_fraction = fraction;
        }
        if let Some(randomness) = self.randomness {
            config.randomness = randomness;
        }
    }
}

#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Total score to split
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub total: i64,

    /// Subject names in order (comma-separated or repeated)
    #[arg(long, short = 's', required = true, action = clap::ArgAction::Append, value_delimiter = ',')]
    pub subjects: Vec<String>,

    /// Relative subject weights, aligned with --subjects (default: equal)
    #[arg(long, short = 'w', action = clap::ArgAction::Append, value_delimiter = ',', conflicts_with = "max_scores")]
    pub weights: Vec<f64>,

    /// Absolute maximum score per subject; switches to capped mode
    #[arg(long, short = 'm', action = clap::ArgAction::Append, value_delimiter = ',')]
    pub max_scores: Vec<i64>,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Seed for a reproducible result
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct RosterArgs {
    /// Roster CSV: name column, subject columns, and a total column
    pub input: PathBuf,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Seed policy: random, row, row-total, or an integer base seed
    #[arg(long, value_parser = parse_seed_policy)]
    pub seed_policy: Option<SeedPolicy>,

    /// Ignore (NN%) header weights and split evenly
    #[arg(long)]
    pub no_weights: bool,
}

impl RosterArgs {
    /// Override config defaults with any flags that were given
    pub fn apply(&self, config: &mut AllocConfig) {
        self.tuning.apply(config);
        if let Some(policy) = self.seed_policy {
            config.seed = policy;
        }
        if self.no_weights {
            config.use_weights = false;
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Output CSV path (default: <input>_allocated.csv next to the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigSubcommand {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration and where it came from
    Show,

    /// Write a default scoresplit.toml in the root directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
