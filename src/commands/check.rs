//! Implementation of the `check` command.

use super::{GlobalArgs, load_config};
use crate::cli::CheckArgs;
use crate::error::{Result, SamplesError};
use crate::invoker::{OpenScadInvoker, ToolInvoker};

/// Execute the `check` command.
pub fn cmd_check(globals: &GlobalArgs, args: CheckArgs) -> Result<()> {
    let mut config = load_config(globals.config.as_deref())?;
    if let Some(openscad) = args.openscad {
        config.openscad_path = Some(openscad);
    }
    if let Some(template) = args.template {
        config.scad_file = Some(template);
    }

    let invoker = OpenScadInvoker::discover(config.openscad_path.as_deref(), config.template_path())
        .map_err(|e| SamplesError::Environment(e.to_string()))?;

    println!("OpenSCAD: {}", shell_words::join(invoker.program()));
    println!("Template: {}", invoker.template().display());

    invoker
        .check_available()
        .map_err(|e| SamplesError::Environment(e.to_string()))?;

    let version = invoker
        .version()
        .map_err(|e| SamplesError::Environment(e.to_string()))?;
    println!("Version:  {}", version);
    println!("OK");

    Ok(())
}
