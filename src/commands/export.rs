//! `scoresplit export` - write generated scores to CSV

use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use scoresplit_core::batch;
use scoresplit_core::config::AllocConfig;
use scoresplit_core::error::{Result, ScoreSplitError};
use scoresplit_core::records::{escape_quotes, format_header};
use scoresplit_core::report;
use scoresplit_core::roster::Roster;

/// Execute the export command
pub fn execute(
    cli: &Cli,
    config: &AllocConfig,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let roster = Roster::load(input, &config.total_columns)?;
    let results = batch::allocate_roster(&roster, &config.batch_options())?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| report::default_export_path(input));
    if output == input {
        return Err(ScoreSplitError::invalid_argument(format!(
            "refusing to overwrite the input roster {}",
            input.display()
        )));
    }

    let subjects = roster.subject_names();
    report::write_csv(&output, &subjects, &results)?;
    info!(path = %output.display(), students = results.len(), "export");

    match cli.format {
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Exported {} students to {}",
                    results.len(),
                    output.display()
                );
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "output": output.display().to_string(),
                    "students": results.len(),
                    "subjects": subjects,
                })
            );
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(
                    "export",
                    &[
                        ("students", results.len().to_string()),
                        ("output", format!("\"{}\"", escape_quotes(&output.display().to_string()))),
                    ],
                )
            );
        }
    }
    Ok(())
}
