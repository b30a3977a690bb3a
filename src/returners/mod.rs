//! Result dispatch
//!
//! A returner receives the finished results once rendering is complete.

pub mod file;
pub mod terminal;

pub use file::FileReturner;
pub use terminal::TerminalReturner;

use crate::error::Result;
use crate::render::RenderResults;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReturnOptions {
    /// Directory the file returner writes into
    pub result_dir: PathBuf,
}

impl Default for ReturnOptions {
    fn default() -> Self {
        Self {
            result_dir: PathBuf::from("./Output/"),
        }
    }
}

pub trait Returner: Send + Sync {
    fn name(&self) -> &'static str;

    fn dispatch(&self, results: &RenderResults, options: &ReturnOptions) -> Result<()>;
}

/// Leaves results on the generator for the caller to read
pub struct SelfReturner;

impl Returner for SelfReturner {
    fn name(&self) -> &'static str {
        "self"
    }

    fn dispatch(&self, _results: &RenderResults, _options: &ReturnOptions) -> Result<()> {
        Ok(())
    }
}
