//! CLI argument parsing for filament-samples.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Filament-samples: generate 3D-printable filament swatches from a CSV catalog.
///
/// Each catalog row (brand, type, color, hotend and bed temperature, optional
/// text sizes) is rendered to its own STL file by OpenSCAD, several rows at a
/// time.
#[derive(Parser, Debug)]
#[command(name = "filament-samples")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ~/.config/filament-samples/config.yaml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output: per-file progress, OpenSCAD version, debug logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one model file per catalog row.
    ///
    /// Checks OpenSCAD, parses the whole CSV (any bad row aborts), then runs
    /// every row on a worker pool. Failed rows are reported at the end.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Check that OpenSCAD and the template are usable and print the version.
    Check(CheckArgs),

    /// Config file management.
    Config(ConfigCommand),
}

/// Output format for command results on stdout.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// CSV catalog (overrides `csv_file` from the config).
    pub csv: Option<PathBuf>,

    /// Directory for generated files (default: `stl/` next to the CSV).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// OpenSCAD template (default: `FilamentSamples.scad` next to the CSV).
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Parallel OpenSCAD processes, clamped to 1..=32 (default: CPU count).
    #[arg(short = 'j', long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// OpenSCAD command, e.g. "flatpak run org.openscad.OpenSCAD".
    #[arg(long)]
    pub openscad: Option<String>,

    /// Output file extension (default: stl).
    #[arg(long)]
    pub extension: Option<String>,

    /// List the files that would be generated without running OpenSCAD.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Treat the first row as data even if it looks like a header.
    #[arg(long)]
    pub no_header_detection: bool,

    /// Result format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    /// OpenSCAD command to check instead of the configured/detected one.
    #[arg(long)]
    pub openscad: Option<String>,

    /// Template to check instead of the configured one.
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

/// Config management command.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example config file.
    Init(ConfigInitArgs),

    /// Print the effective config as YAML.
    Show,

    /// Print the default config file location.
    Path,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the config (default: the user config location).
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,
}
