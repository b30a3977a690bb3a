//! Command line interface
//!
//! - Argument parsing structures
//! - Data file selection and flag handling for one run

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{execute, load_config};
