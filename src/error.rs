//! Error types for the filament-samples CLI.
//!
//! Uses thiserror for derive macros. Each variant corresponds to one class of
//! failure and maps to its own exit code.

use crate::aggregate::GenerationError;
use crate::exit_codes;
use crate::parser::FormatError;
use thiserror::Error;

/// Main error type for filament-samples operations.
#[derive(Error, Debug)]
pub enum SamplesError {
    /// User provided invalid arguments, configuration, or input paths.
    #[error("{0}")]
    UserError(String),

    /// OpenSCAD (or the template it needs) is not usable on this host.
    #[error("OpenSCAD check failed: {0}")]
    Environment(String),

    /// A CSV row was malformed. Parsing is all-or-nothing.
    #[error("failed to parse CSV file: {0}")]
    Format(#[from] FormatError),

    /// A filesystem resource needed before dispatch could not be prepared.
    #[error("{0}")]
    Resource(String),

    /// One or more generation jobs failed after all jobs ran.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl SamplesError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SamplesError::UserError(_) => exit_codes::USER_ERROR,
            SamplesError::Environment(_) => exit_codes::ENVIRONMENT_FAILURE,
            SamplesError::Format(_) => exit_codes::FORMAT_FAILURE,
            SamplesError::Resource(_) => exit_codes::RESOURCE_FAILURE,
            SamplesError::Generation(_) => exit_codes::GENERATION_FAILURE,
        }
    }
}

/// Result type alias for filament-samples operations.
pub type Result<T> = std::result::Result<T, SamplesError>;
