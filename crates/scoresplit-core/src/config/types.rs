//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::allocator::DEFAULT_RANDOMNESS;
use crate::roster::default_total_columns;
use crate::seed::SeedPolicy;

/// Per-directory config file name
pub const CONFIG_FILE_NAME: &str = "scoresplit.toml";

/// Allocation defaults, overridable per invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocConfig {
    /// Minimum score every subject receives
    #[serde(default = "default_min_each")]
    pub min_each: i64,

    /// Per-subject cap as a fraction of the total (weighted rosters only)
    #[serde(default = "default_max_each_fraction")]
    pub max_each_fraction: f64,

    /// Noise intensity; 0 disables variation
    #[serde(default = "default_randomness")]
    pub randomness: f64,

    /// Follow `(NN%)` header weights; false splits evenly
    #[serde(default = "default_use_weights")]
    pub use_weights: bool,

    /// Seed policy for batch runs
    #[serde(default)]
    pub seed: SeedPolicy,

    /// Header names that mark the per-student total column
    #[serde(default = "default_total_columns")]
    pub total_columns: Vec<String>,
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self {
            min_each: default_min_each(),
            max_each_fraction: default_max_each_fraction(),
            randomness: default_randomness(),
            use_weights: default_use_weights(),
            seed: SeedPolicy::default(),
            total_columns: default_total_columns(),
        }
    }
}

fn default_min_each() -> i64 {
    1
}

fn default_max_each_fraction() -> f64 {
    0.6
}

fn default_randomness() -> f64 {
    DEFAULT_RANDOMNESS
}

fn default_use_weights() -> bool {
    true
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config <path>`
    Explicit(std::path::PathBuf),
    /// `scoresplit.toml` in the working directory
    Local(std::path::PathBuf),
    /// The per-user config file
    Global(std::path::PathBuf),
    /// Built-in defaults
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::Global(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Default => write!(f, "defaults"),
        }
    }
}
