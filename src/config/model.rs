//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a generation run.
///
/// Relative paths are resolved against the process working directory.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Input / output
    // =========================================================================
    /// CSV catalog to read.
    #[serde(default = "default_csv_file")]
    pub csv_file: PathBuf,

    /// Directory for generated files (default: `stl/` next to the CSV file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// OpenSCAD template (default: `FilamentSamples.scad` next to the CSV file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scad_file: Option<PathBuf>,

    /// Extension of generated files, without a leading dot.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Treat a first data row starting with `brand`/`manufacturer` as a header.
    #[serde(default = "default_true")]
    pub detect_header: bool,

    // =========================================================================
    // Execution
    // =========================================================================
    /// Parallel OpenSCAD processes. Clamped to `[1, 32]` by `validate`.
    #[serde(default = "default_max_workers")]
    pub max_workers: i64,

    /// OpenSCAD command, split with shell quoting (default: auto-detect).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openscad_path: Option<String>,

    /// Report planned files without running OpenSCAD.
    #[serde(default)]
    pub dry_run: bool,

    /// Log per-file progress and the OpenSCAD version.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_file: default_csv_file(),
            output_dir: None,
            scad_file: None,
            output_extension: default_output_extension(),
            detect_header: default_true(),
            max_workers: default_max_workers(),
            openscad_path: None,
            dry_run: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Config written by `config init`.
    pub fn example() -> Self {
        Self {
            csv_file: DEFAULT_CSV_FILE.into(),
            output_dir: Some(DEFAULT_OUTPUT_DIR.into()),
            scad_file: Some(DEFAULT_TEMPLATE.into()),
            max_workers: 4,
            ..Self::default()
        }
    }
}
