//! `scoresplit config` - inspect or create the configuration file

use std::path::Path;

use serde_json::json;

use crate::cli::{Cli, OutputFormat};
use scoresplit_core::config::{AllocConfig, ConfigSource, CONFIG_FILE_NAME};
use scoresplit_core::error::{Result, ScoreSplitError};
use scoresplit_core::records::{escape_quotes, format_header};

/// Print the effective configuration
pub fn show(cli: &Cli, config: &AllocConfig, source: &ConfigSource) -> Result<()> {
    match cli.format {
        OutputFormat::Human => {
            let body = config.to_toml()?;
            if !cli.quiet {
                println!("# source: {}", source);
            }
            print!("{}", body);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "source": source.to_string(),
                    "config": config,
                })
            );
        }
        OutputFormat::Records => {
            let columns: Vec<String> = config
                .total_columns
                .iter()
                .map(|c| format!("\"{}\"", escape_quotes(c)))
                .collect();
            println!(
                "{}",
                format_header(
                    "config",
                    &[
                        ("source", format!("\"{}\"", escape_quotes(&source.to_string()))),
                        ("min_each", config.min_each.to_string()),
                        ("max_each_fraction", config.max_each_fraction.to_string()),
                        ("randomness", config.randomness.to_string()),
                        ("use_weights", config.use_weights.to_string()),
                        ("seed", config.seed.to_string()),
                        ("total_columns", columns.join(",")),
                    ],
                )
            );
        }
    }
    Ok(())
}

/// Write a default config file into `root`
pub fn init(cli: &Cli, root: &Path, force: bool) -> Result<()> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(ScoreSplitError::UsageError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    AllocConfig::default().save(&path)?;

    match cli.format {
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", json!({ "path": path.display().to_string() }));
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(
                    "config",
                    &[("path", format!("\"{}\"", escape_quotes(&path.display().to_string())))],
                )
            );
        }
    }
    Ok(())
}
