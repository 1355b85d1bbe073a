//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_TEMPLATE};
use crate::error::{Result, SamplesError};
use crate::scheduler::clamp_workers;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SamplesError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SamplesError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SamplesError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SamplesError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Write config as YAML, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SamplesError::UserError(format!(
                    "failed to create config directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(path, yaml).map_err(|e| {
            SamplesError::UserError(format!(
                "failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Validate config values.
    ///
    /// Rules:
    /// - `csv_file` must be set
    /// - `output_extension` must be non-empty and have no leading dot
    /// - `max_workers` is clamped to `[1, 32]` (corrected, not rejected)
    pub fn validate(&mut self) -> Result<()> {
        if self.csv_file.as_os_str().is_empty() {
            return Err(SamplesError::UserError(
                "config validation failed: csv_file is required".to_string(),
            ));
        }

        if self.output_extension.is_empty() {
            return Err(SamplesError::UserError(
                "config validation failed: output_extension must be non-empty".to_string(),
            ));
        }
        if self.output_extension.starts_with('.') {
            return Err(SamplesError::UserError(format!(
                "config validation failed: output_extension must not have a leading dot (found '{}'). Use '{}' instead.",
                self.output_extension,
                self.output_extension.trim_start_matches('.')
            )));
        }

        self.max_workers = clamp_workers(self.max_workers) as i64;
        Ok(())
    }

    /// Directory that holds the CSV file (empty for a bare file name).
    fn csv_dir(&self) -> &Path {
        self.csv_file.parent().unwrap_or(Path::new(""))
    }

    /// Resolved output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.csv_dir().join(DEFAULT_OUTPUT_DIR))
    }

    /// Resolved OpenSCAD template path.
    pub fn template_path(&self) -> PathBuf {
        self.scad_file
            .clone()
            .unwrap_or_else(|| self.csv_dir().join(DEFAULT_TEMPLATE))
    }
}

/// Default config file location.
///
/// `$XDG_CONFIG_HOME/filament-samples/config.yaml`, falling back to
/// `$HOME/.config/...`, then to `filament-samples.yaml` in the working directory.
pub fn default_config_path() -> PathBuf {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")),
    )
}

pub(crate) fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let config_home = xdg_config_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|v| !v.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        });

    match config_home {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        None => PathBuf::from(format!("{}.yaml", CONFIG_DIR_NAME)),
    }
}
