//! Allocation configuration for scoresplit
//!
//! Lookup order: `--config <path>`, then `scoresplit.toml` in the working
//! directory, then the per-user file, then built-in defaults. Command-line
//! flags override whichever file wins.

pub mod global;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::allocator::types::{validate_max_each_fraction, validate_min_each, validate_randomness};
use crate::batch::BatchOptions;
use crate::bail_invalid;
use crate::error::{Result, ScoreSplitError};

pub use global::{global_config_path, CONFIG_DIR_ENV_VAR};
pub use types::{AllocConfig, ConfigSource, CONFIG_FILE_NAME};

impl AllocConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScoreSplitError::io_operation("read config", path.display(), e))?;
        let config: AllocConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScoreSplitError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content)
            .map_err(|e| ScoreSplitError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Apply the allocator's argument rules to the stored defaults
    pub fn validate(&self) -> Result<()> {
        validate_min_each(self.min_each)?;
        validate_max_each_fraction(self.max_each_fraction)?;
        validate_randomness(self.randomness)?;
        if self.total_columns.iter().all(|c| c.trim().is_empty()) {
            bail_invalid!("total_columns must name at least one column");
        }
        Ok(())
    }

    /// Find and load the effective configuration
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<(Self, ConfigSource)> {
        let global = global_config_path().ok();
        Self::resolve_with_global(explicit, root, global)
    }

    fn resolve_with_global(
        explicit: Option<&Path>,
        root: &Path,
        global: Option<PathBuf>,
    ) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            let config = Self::load(&path)?;
            return Ok((config, ConfigSource::Explicit(path)));
        }

        let local = root.join(CONFIG_FILE_NAME);
        if local.is_file() {
            let config = Self::load(&local)?;
            return Ok((config, ConfigSource::Local(local)));
        }

        if let Some(global) = global.filter(|p| p.is_file()) {
            let config = Self::load(&global)?;
            return Ok((config, ConfigSource::Global(global)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    /// Batch options with these defaults
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            min_each: self.min_each,
            max_each_fraction: self.max_each_fraction,
            randomness: self.randomness,
            use_weights: self.use_weights,
            seed_policy: self.seed,
        }
    }
}
