//! filament-samples: generate 3D-printable filament swatches from a CSV catalog.
//!
//! This is the main entry point for the `filament-samples` CLI. It parses
//! arguments, sets up logging, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod aggregate;
mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod invoker;
mod logging;
pub mod naming;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod scheduler;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result =
        logging::init_logging(commands::verbose_requested(&cli)).and_then(|()| commands::dispatch(cli));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
