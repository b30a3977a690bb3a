//! Generator configuration
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration. Files are TOML or YAML, picked by extension. Environment variables
//! override file values; command line flags override both.

use crate::error::{Error, Result};
use crate::processors::{ProcessorOptions, DEFAULT_SPLIT_DELIMITER};
use crate::render::RenderOptions;
use crate::returners::ReturnOptions;
use crate::templates::ResolverSettings;
use crate::validate::{ValidationPolicy, DEFAULT_MODEL_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Field naming the template of each record
    pub template_key: String,
    /// Field naming the result each rendered record joins
    pub result_key: String,
    /// Directory, `.xlsx` spreadsheet or `.txt` file holding templates
    pub templates: PathBuf,
    /// Directory searched for `ttr://` templates before the packaged collection
    pub collection_root: Option<PathBuf>,
    /// Data loader name; inferred from the data file extension when unset
    pub data_loader: Option<String>,
    /// Processors applied in order after loading
    pub processors: Vec<String>,
    /// Glob patterns for the filtering processor
    pub filters: Vec<String>,
    pub split_delimiter: Option<String>,
    pub renderer: String,
    pub render: RenderOptions,
    pub returner: String,
    pub result_dir: PathBuf,
    pub model_key: String,
    pub models_dir: Option<PathBuf>,
    pub on_validation_failure: ValidationPolicy,
    pub log_level: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_key: "template".to_string(),
            result_key: "device".to_string(),
            templates: PathBuf::from("./Templates/"),
            collection_root: None,
            data_loader: None,
            processors: Vec::new(),
            filters: Vec::new(),
            split_delimiter: Some(DEFAULT_SPLIT_DELIMITER.to_string()),
            renderer: "tera".to_string(),
            render: RenderOptions::default(),
            returner: "self".to_string(),
            result_dir: PathBuf::from("./Output/"),
            model_key: DEFAULT_MODEL_KEY.to_string(),
            models_dir: None,
            on_validation_failure: ValidationPolicy::default(),
            log_level: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml") | Some("yml") => {
                if content.trim().is_empty() {
                    Ok(Self::default())
                } else {
                    Ok(serde_yaml::from_str(&content)?)
                }
            }
            _ => Err(Error::Config(format!(
                "Unsupported config format: {} (expected .toml, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Apply `TTR_*` environment overrides
    pub fn merge_env_vars(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(templates) = var("TTR_TEMPLATES") {
            self.templates = PathBuf::from(templates);
        }

        if let Some(root) = var("TTR_COLLECTION_ROOT") {
            self.collection_root = Some(PathBuf::from(root));
        }

        if let Some(result_dir) = var("TTR_RESULT_DIR") {
            self.result_dir = PathBuf::from(result_dir);
        }

        if let Some(log_level) = var("TTR_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }
    }

    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            template_key: self.template_key.clone(),
            result_key: self.result_key.clone(),
            filters: self.filters.clone(),
            split_delimiter: self.split_delimiter.clone(),
        }
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            templates: Some(self.templates.clone()),
            collection_root: self.collection_root.clone(),
        }
    }

    pub fn return_options(&self) -> ReturnOptions {
        ReturnOptions {
            result_dir: self.result_dir.clone(),
        }
    }
}
