//! Implementation of the `generate` command.

use super::{GlobalArgs, load_config};
use crate::aggregate::GenerationError;
use crate::cli::{GenerateArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Result, SamplesError};
use crate::pipeline::{Generator, RunContext, RunReport};
use serde_json::json;
use std::path::Path;

/// Execute the `generate` command.
pub fn cmd_generate(globals: &GlobalArgs, args: GenerateArgs) -> Result<()> {
    let base = load_config(globals.config.as_deref())?;
    let format = args.format;
    let config = apply_overrides(base, globals, args)?;
    let output_dir = config.output_dir();

    let generator = Generator::new(RunContext::from_config(config)?);
    match generator.run() {
        Ok(report) => {
            println!("{}", render_report(&report, &output_dir, format)?);
            Ok(())
        }
        Err(SamplesError::Generation(err)) => {
            println!("{}", render_failures(&err, format)?);
            Err(SamplesError::Generation(err))
        }
        Err(err) => Err(err),
    }
}

/// Layer command-line values over the loaded config, then validate.
pub(crate) fn apply_overrides(mut config: Config, globals: &GlobalArgs, args: GenerateArgs) -> Result<Config> {
    if let Some(csv) = args.csv {
        config.csv_file = csv;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = Some(output_dir);
    }
    if let Some(template) = args.template {
        config.scad_file = Some(template);
    }
    if let Some(workers) = args.workers {
        config.max_workers = workers;
    }
    if let Some(openscad) = args.openscad {
        config.openscad_path = Some(openscad);
    }
    if let Some(extension) = args.extension {
        config.output_extension = extension;
    }
    config.dry_run |= args.dry_run;
    config.verbose |= globals.verbose;
    if args.no_header_detection {
        config.detect_header = false;
    }

    config.validate()?;
    Ok(config)
}

pub(crate) fn render_report(report: &RunReport, output_dir: &Path, format: OutputFormat) -> Result<String> {
    match (report, format) {
        (RunReport::DryRun { planned }, OutputFormat::Text) => {
            let mut lines = vec![format!(
                "Dry run: {} file(s) would be generated in {}",
                planned.len(),
                output_dir.display()
            )];
            lines.extend(planned.iter().map(|job| format!("Would generate: {}", job.filename)));
            Ok(lines.join("\n"))
        }
        (RunReport::DryRun { planned }, OutputFormat::Json) => to_json(&json!({
            "dry_run": true,
            "output_dir": output_dir,
            "planned": planned,
        })),
        (RunReport::Generated(summary), OutputFormat::Text) => Ok(format!(
            "Successfully generated {} file(s) in {}",
            summary.succeeded,
            output_dir.display()
        )),
        (RunReport::Generated(summary), OutputFormat::Json) => to_json(&json!({
            "dry_run": false,
            "output_dir": output_dir,
            "summary": summary,
        })),
    }
}

pub(crate) fn render_failures(err: &GenerationError, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut lines = vec![format!(
                "Generated {} of {} file(s); {} failed:",
                err.total - err.failed,
                err.total,
                err.failed
            )];
            lines.extend(
                err.failures
                    .iter()
                    .map(|f| format!("  FAILED {}: {}", f.filename, f.cause)),
            );
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => to_json(&json!({
            "dry_run": false,
            "summary": {
                "succeeded": err.total - err.failed,
                "failed": err.failed,
                "failures": err.failures,
            },
        })),
    }
}

fn to_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| SamplesError::UserError(format!("failed to serialize output: {}", e)))
}
