//! CLI argument structures

use clap::Parser;
use std::path::PathBuf;

/// Template Text Renderer: render data through templates into text files
#[derive(Parser, Debug)]
#[command(name = "ttr")]
#[command(about = "Template Text Renderer - bulk configuration generation from data and templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data file, or directory holding exactly one data file
    #[arg(short = 'd', long, default_value = "./Data/")]
    pub data: PathBuf,

    /// Templates directory, .xlsx spreadsheet or .txt file (default: ./Templates/)
    #[arg(short = 't', long)]
    pub templates: Option<PathBuf>,

    /// Output directory (default: ./Output/<time>_<data file name>/)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print results to the terminal instead of saving them
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Comma separated glob patterns matched against result names
    #[arg(short = 'f', long, value_delimiter = ',')]
    pub filters: Vec<String>,

    /// TOML or YAML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log filter, e.g. "warn" or "ttr=debug"; overrides -v
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}
