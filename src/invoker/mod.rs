//! External geometry generator capability.
//!
//! The pipeline only talks to OpenSCAD through [`ToolInvoker`], so tests can
//! substitute a deterministic fake and never spawn a real process.

use std::path::Path;
use thiserror::Error;

mod openscad;

pub use openscad::OpenScadInvoker;

/// Failure of a single tool call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The tool or something it needs is not installed or not reachable.
    #[error("{0}")]
    Unavailable(String),

    /// The process could not be started.
    #[error("failed to execute {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// The process ran and reported failure.
    #[error("{program} failed ({status}){}", format_stderr(.stderr))]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The worker running this call panicked.
    #[error("generation panicked: {0}")]
    Panicked(String),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Performs generation calls against the external tool.
///
/// Implementations must be shareable across worker threads; `generate` is
/// called concurrently from every worker.
pub trait ToolInvoker: Send + Sync {
    /// Generate one artifact at `output` using the given `-D` definitions.
    fn generate(&self, output: &Path, arguments: &[String]) -> Result<(), InvokeError>;

    /// Confirm the tool can be run. Called once before any job is dispatched.
    fn check_available(&self) -> Result<(), InvokeError>;

    /// Tool version string, informational only.
    fn version(&self) -> Result<String, InvokeError>;
}
