//! Exit code constants for the filament-samples CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: CSV format or validation failure
//! - 3: OpenSCAD unavailable
//! - 4: Output directory could not be prepared
//! - 5: One or more generation jobs failed

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing input file, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// A CSV row was malformed or failed validation. No jobs were run.
pub const FORMAT_FAILURE: i32 = 2;

/// The external generator is missing or unusable. No jobs were run.
pub const ENVIRONMENT_FAILURE: i32 = 3;

/// The output directory could not be created. No jobs were run.
pub const RESOURCE_FAILURE: i32 = 4;

/// Every job ran, but at least one of them failed.
pub const GENERATION_FAILURE: i32 = 5;
