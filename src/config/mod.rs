//! Configuration model for filament-samples.
//!
//! This module defines the Config struct stored as YAML (by default at
//! `~/.config/filament-samples/config.yaml`). It supports forward-compatible
//! parsing (unknown fields are ignored), defaults for every field, and
//! validation that corrects out-of-range worker counts instead of failing.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use operations::default_config_path;
