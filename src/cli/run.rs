//! CLI execution: resolve the data file, build the configuration and run one generation

use super::args::Cli;
use crate::config::GeneratorConfig;
use crate::data::DataSource;
use crate::generator::Generator;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Processors the CLI always applies, in order
pub const CLI_PROCESSORS: [&str; 3] = ["multitemplate", "filtering", "templates_split"];

/// Configuration from the config file and environment, before flags are applied
pub fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    config.merge_env_vars();
    Ok(config)
}

/// Apply command line flags on top of `config` for rendering `data_file`
pub fn apply_flags(cli: &Cli, mut config: GeneratorConfig, data_file: &Path) -> GeneratorConfig {
    if let Some(templates) = &cli.templates {
        config.templates = templates.clone();
    }

    let filters: Vec<String> = cli
        .filters
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if !filters.is_empty() {
        config.filters = filters;
    }

    config.processors = CLI_PROCESSORS.iter().map(|p| p.to_string()).collect();
    config.returner = if cli.print { "terminal" } else { "file" }.to_string();
    config.result_dir = match &cli.output {
        Some(output) => output.clone(),
        None => default_output_dir(&config.result_dir, data_file),
    };
    config
}

/// `<base>/<timestamp>_<data file name>/`
pub fn default_output_dir(base: &Path, data_file: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let name = data_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    base.join(format!("{stamp}_{name}"))
}

/// The data file to render: `data` itself, or the single file inside directory `data`
pub fn resolve_data_file(data: &Path) -> Result<PathBuf> {
    if data.is_file() {
        return Ok(data.to_path_buf());
    }
    if !data.is_dir() {
        bail!("Data file or directory not found: {}", data.display());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(data)
        .with_context(|| format!("Failed to read data directory {}", data.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    match files.len() {
        0 => Err(anyhow!("No files found in '{}' directory", data.display())),
        1 => Ok(files.remove(0)),
        _ => {
            let listing: Vec<String> = files
                .iter()
                .filter_map(|f| f.file_name())
                .map(|n| format!("  {}", n.to_string_lossy()))
                .collect();
            Err(anyhow!(
                "Several files found in '{}' directory, choose one with -d:\n{}",
                data.display(),
                listing.join("\n")
            ))
        }
    }
}

/// Run one generation as requested on the command line
pub fn execute(cli: &Cli, config: GeneratorConfig) -> Result<()> {
    let data_file = resolve_data_file(&cli.data)?;
    let config = apply_flags(cli, config, &data_file);
    debug!(data = ?data_file, templates = ?config.templates, "Starting generation");

    let mut generator = Generator::new(config).context("Failed to set up generator")?;
    generator
        .load_data(DataSource::Path(data_file.clone()), None)
        .with_context(|| format!("Failed to load data from {}", data_file.display()))?;
    let count = generator.run().context("Rendering failed")?.len();

    if generator.config().returner != "terminal" {
        info!(
            results = count,
            output = ?generator.config().result_dir,
            "Generation finished"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ttr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_resolve_single_file_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("data.yaml"), "[]").unwrap();
        fs::create_dir(temp_dir.path().join("archive")).unwrap();

        let file = resolve_data_file(temp_dir.path()).unwrap();

        assert_eq!(file, temp_dir.path().join("data.yaml"));
        assert_eq!(resolve_data_file(&file).unwrap(), file);
    }

    #[test]
    fn test_resolve_rejects_empty_and_ambiguous_directories() {
        let temp_dir = TempDir::new().unwrap();
        let err = resolve_data_file(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("No files found"));

        fs::write(temp_dir.path().join("a.csv"), "").unwrap();
        fs::write(temp_dir.path().join("b.yaml"), "").unwrap();
        let err = resolve_data_file(temp_dir.path()).unwrap_err().to_string();
        assert!(err.contains("Several files found"));
        assert!(err.contains("a.csv"));
        assert!(err.contains("b.yaml"));

        assert!(resolve_data_file(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_apply_flags() {
        let cli = cli(&["-t", "tpl.xlsx", "-f", "core*, ,r1", "-p"]);
        let config = apply_flags(&cli, GeneratorConfig::default(), Path::new("data.csv"));

        assert_eq!(config.templates, PathBuf::from("tpl.xlsx"));
        assert_eq!(config.filters, vec!["core*", "r1"]);
        assert_eq!(config.processors, CLI_PROCESSORS);
        assert_eq!(config.returner, "terminal");
        assert!(config.result_dir.starts_with("./Output/"));
        assert!(config
            .result_dir
            .to_string_lossy()
            .ends_with("_data.csv"));
    }

    #[test]
    fn test_output_flag_and_file_returner() {
        let cli = cli(&["-o", "out"]);
        let mut base = GeneratorConfig::default();
        base.templates = PathBuf::from("from-config");
        base.filters = vec!["keep".to_string()];

        let config = apply_flags(&cli, base, Path::new("data.csv"));

        assert_eq!(config.result_dir, PathBuf::from("out"));
        assert_eq!(config.returner, "file");
        assert_eq!(config.templates, PathBuf::from("from-config"));
        assert_eq!(config.filters, vec!["keep"]);
    }
}
