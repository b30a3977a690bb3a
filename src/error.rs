use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Unable to identify data loader for '{0}'")]
    UnknownDataSource(String),

    #[error("Unknown {kind} plugin: '{name}'")]
    PluginNotFound { kind: &'static str, name: String },

    #[error("Record #{index} has no '{key}' result key value")]
    MissingResultKey { index: usize, key: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to write results to {path:?}")]
    Return {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn plugin_not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::PluginNotFound {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
