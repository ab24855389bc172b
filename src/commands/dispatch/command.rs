//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::cli::Cli;
use scoresplit_core::config::{AllocConfig, ConfigSource};
use scoresplit_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Resolve the effective config file for this invocation
    pub fn load_config(&self) -> Result<(AllocConfig, ConfigSource)> {
        let (config, source) = AllocConfig::resolve(self.cli.config.as_deref(), self.root)?;
        debug!(source = %source, elapsed = ?self.start.elapsed(), "load_config");
        Ok((config, source))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("scoresplit {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Split exam totals into plausible per-subject scores.");
        println!();
        println!("Run `scoresplit --help` for usage information.");
        Ok(())
    }
}
