//! Error handling utilities

use crate::error::Error;
use tracing::error;

const GENERAL_ERROR: i32 = 1;
const ARGUMENT_ERROR: i32 = 2;

/// Exit code for a fatal error
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(
            Error::Config(_)
            | Error::UnknownDataSource(_)
            | Error::PluginNotFound { .. }
            | Error::Toml(_),
        ) => ARGUMENT_ERROR,
        _ => GENERAL_ERROR,
    }
}

/// Handle fatal errors and exit with appropriate status code
///
/// - `verbose = 0`: the error message only
/// - `verbose >= 1`: the full error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    eprintln!("Error: {error}");
    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code(&error))
}
