//! Per-user configuration location (~/.config/scoresplit/config.toml)

use std::path::PathBuf;

use crate::error::{Result, ScoreSplitError};

const CONFIG_DIR: &str = "scoresplit";
const CONFIG_FILE: &str = "config.toml";

/// Overrides the per-user config directory
pub const CONFIG_DIR_ENV_VAR: &str = "SCORESPLIT_CONFIG_DIR";

/// Path of the per-user config file, whether or not it exists
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
        PathBuf::from(env_dir)
    } else {
        dirs::config_dir()
            .ok_or_else(|| ScoreSplitError::Other("unable to determine config directory".to_string()))?
            .join(CONFIG_DIR)
    };

    Ok(config_dir.join(CONFIG_FILE))
}
