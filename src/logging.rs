//! Logging setup.
//!
//! Structured logging through `tracing`. The subscriber is installed once by
//! the binary; library code only emits events. Output goes to stderr so that
//! command output on stdout (dry-run listings, JSON) stays machine readable.

use crate::error::{Result, SamplesError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a full `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "FILAMENT_SAMPLES_LOG";

/// Initialize the global subscriber.
///
/// Priority: `FILAMENT_SAMPLES_LOG`, then `debug` when verbose, else `info`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = build_env_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), verbose)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| SamplesError::UserError(format!("failed to initialize logging: {}", e)))
}

fn build_env_filter(directives: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    if let Some(directives) = directives.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives).map_err(|e| {
            SamplesError::UserError(format!("invalid {} value '{}': {}", LOG_ENV_VAR, directives, e))
        });
    }

    let level = if verbose { "debug" } else { "info" };
    Ok(EnvFilter::new(level))
}
