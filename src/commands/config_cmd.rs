//! Implementation of the `config` subcommands.

use super::{GlobalArgs, load_config};
use crate::cli::ConfigInitArgs;
use crate::config::{Config, default_config_path};
use crate::error::{Result, SamplesError};
use std::path::PathBuf;

/// Write the example config. Refuses to overwrite without `--force`.
pub fn cmd_config_init(args: ConfigInitArgs) -> Result<()> {
    let path = write_example_config(args.path, args.force)?;
    println!("Wrote example config to {}", path.display());
    Ok(())
}

pub(crate) fn write_example_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = path.unwrap_or_else(default_config_path);

    if path.exists() && !force {
        return Err(SamplesError::UserError(format!(
            "config file '{}' already exists\n\
             Fix: pass --force to overwrite it.",
            path.display()
        )));
    }

    Config::example().save(&path)?;
    Ok(path)
}

/// Print the effective config.
pub fn cmd_config_show(globals: &GlobalArgs) -> Result<()> {
    let mut config = load_config(globals.config.as_deref())?;
    config.verbose |= globals.verbose;
    print!("{}", config.to_yaml()?);
    Ok(())
}

/// Print the default config location.
pub fn cmd_config_path() -> Result<()> {
    println!("{}", default_config_path().display());
    Ok(())
}
