//! Command dispatch logic for scoresplit

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::Cli;
use scoresplit_core::error::Result;
use tracing::debug;

mod command;
mod commands;

use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Determine the root directory
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    let result = match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    };

    debug!(elapsed = ?start.elapsed(), "execute_command");
    result
}
