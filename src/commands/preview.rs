//! `scoresplit preview` - print generated scores for a roster

use std::path::Path;

use crate::cli::Cli;
use scoresplit_core::batch;
use scoresplit_core::config::AllocConfig;
use scoresplit_core::error::Result;
use scoresplit_core::report;
use scoresplit_core::roster::Roster;

/// Execute the preview command. The roster file is only read.
pub fn execute(cli: &Cli, config: &AllocConfig, input: &Path) -> Result<()> {
    let roster = Roster::load(input, &config.total_columns)?;
    let results = batch::allocate_roster(&roster, &config.batch_options())?;
    print!(
        "{}",
        report::render_batch(cli.format, &roster.subject_names(), &results)
    );
    Ok(())
}
