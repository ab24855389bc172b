//! Command implementations for all scoresplit commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use scoresplit_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::cli::paths::resolve_against;
    use crate::cli::{AllocateArgs, ConfigCommands, ExportArgs, RosterArgs};
    use crate::commands::{allocate, config, export, preview};

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Allocate(args) => execute_allocate(ctx, args),
            Commands::Preview(args) => execute_preview(ctx, args),
            Commands::Export(args) => execute_export(ctx, args),
            Commands::Config(subcmd) => execute_config(ctx, &subcmd.command),
        }
    }

    fn execute_allocate(ctx: &CommandContext, args: &AllocateArgs) -> Result<()> {
        let (mut cfg, _) = ctx.load_config()?;
        args.tuning.apply(&mut cfg);
        cfg.validate()?;
        allocate::execute(ctx.cli, &cfg, args)
    }

    fn execute_preview(ctx: &CommandContext, args: &RosterArgs) -> Result<()> {
        let (mut cfg, _) = ctx.load_config()?;
        args.apply(&mut cfg);
        cfg.validate()?;
        let input = resolve_against(ctx.root, &args.input);
        preview::execute(ctx.cli, &cfg, &input)
    }

    fn execute_export(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
        let (mut cfg, _) = ctx.load_config()?;
        args.roster.apply(&mut cfg);
        cfg.validate()?;
        let input = resolve_against(ctx.root, &args.roster.input);
        let output = args.output.as_deref().map(|p| resolve_against(ctx.root, p));
        export::execute(ctx.cli, &cfg, &input, output.as_deref())
    }

    fn execute_config(ctx: &CommandContext, command: &ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                let (cfg, source) = ctx.load_config()?;
                config::show(ctx.cli, &cfg, &source)
            }
            ConfigCommands::Init { force } => config::init(ctx.cli, ctx.root, *force),
        }
    }
}
