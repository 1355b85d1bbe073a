//! Configuration defaults and constants for filament-samples.

use crate::scheduler::default_worker_count;

/// CSV file used when none is configured.
pub const DEFAULT_CSV_FILE: &str = "samples.csv";

/// Output directory name, relative to the CSV file's directory.
pub const DEFAULT_OUTPUT_DIR: &str = "stl";

/// Template file name, relative to the CSV file's directory.
pub const DEFAULT_TEMPLATE: &str = "FilamentSamples.scad";

/// Directory under the user config dir that holds `config.yaml`.
pub const CONFIG_DIR_NAME: &str = "filament-samples";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

// Default value functions for serde
pub(crate) fn default_csv_file() -> std::path::PathBuf {
    DEFAULT_CSV_FILE.into()
}
pub(crate) fn default_max_workers() -> i64 {
    default_worker_count() as i64
}
pub(crate) fn default_output_extension() -> String {
    crate::naming::DEFAULT_EXTENSION.to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
