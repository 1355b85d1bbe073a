//! Command implementations for filament-samples.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the config resolution shared by every command.

mod check;
mod config_cmd;
mod generate;


use crate::cli::{Cli, Command, ConfigAction};
use crate::config::{Config, default_config_path};
use crate::error::Result;
use std::path::Path;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<std::path::PathBuf>,
    pub verbose: bool,
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let globals = GlobalArgs {
        config: cli.config,
        verbose: cli.verbose,
    };

    match cli.command {
        Command::Generate(args) => generate::cmd_generate(&globals, args),
        Command::Check(args) => check::cmd_check(&globals, args),
        Command::Config(cmd) => match cmd.action {
            ConfigAction::Init(args) => config_cmd::cmd_config_init(args),
            ConfigAction::Show => config_cmd::cmd_config_show(&globals),
            ConfigAction::Path => config_cmd::cmd_config_path(),
        },
    }
}

/// Load the config named on the command line, or the default config file if
/// one exists, or built-in defaults.
///
/// An explicitly named file must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    load_config_from(explicit, &default_config_path())
}

fn load_config_from(explicit: Option<&Path>, default_path: &Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None if default_path.is_file() => Config::load(default_path),
        None => Ok(Config::default()),
    }
}

/// Whether verbose output was requested on the command line or in the config.
///
/// Used before logging is initialized, so config errors are ignored here and
/// reported later by the command itself.
pub fn verbose_requested(cli: &Cli) -> bool {
    cli.verbose
        || load_config(cli.config.as_deref())
            .map(|c| c.verbose)
            .unwrap_or(false)
}
