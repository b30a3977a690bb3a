//! Data loaders
//!
//! Loaders turn a data source into the ordered record list the pipeline renders.
//! The loader is picked by name, or inferred from the extension of a source file.

pub mod csv;
pub mod xlsx;
pub mod yaml;

pub use self::csv::CsvLoader;
pub use self::xlsx::XlsxLoader;
pub use self::yaml::YamlLoader;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::templates::TemplateCache;
use std::fs;
use std::path::{Path, PathBuf};

/// Where records come from: a file on disk or text supplied inline
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Path(PathBuf),
    Text(String),
}

impl DataSource {
    /// Treat `input` as a path when it names an existing file, as inline text otherwise
    pub fn parse(input: &str) -> Self {
        let path = Path::new(input);
        if !input.contains('\n') && path.is_file() {
            DataSource::Path(path.to_path_buf())
        } else {
            DataSource::Text(input.to_string())
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            DataSource::Path(path) => Some(path),
            DataSource::Text(_) => None,
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            DataSource::Path(path) => Ok(fs::read_to_string(path)?),
            DataSource::Text(text) => Ok(text.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Text(text) => {
                let preview: String = text.chars().take(40).collect();
                format!("inline text '{preview}'")
            }
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

/// Shared state a loader may read or populate
pub struct LoadContext<'a> {
    pub template_key: &'a str,
    /// Spreadsheet loaders store template tabs here
    pub templates: &'a mut TemplateCache,
}

pub trait DataLoader: Send + Sync {
    fn name(&self) -> &'static str;

    fn load(&self, source: &DataSource, context: &mut LoadContext<'_>) -> Result<Vec<Record>>;
}

/// Pick the loader name: explicit choice first, then the source file extension
pub fn infer_loader_name(source: &DataSource, explicit: Option<&str>) -> Result<String> {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }

    source
        .path()
        .filter(|path| path.is_file())
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| Error::UnknownDataSource(source.describe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_source() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.csv");
        fs::write(&file, "device,template\n").unwrap();

        let source = DataSource::parse(file.to_str().unwrap());
        assert_eq!(source, DataSource::Path(file));

        let source = DataSource::parse("- device: r1\n  template: base\n");
        assert!(matches!(source, DataSource::Text(_)));
    }

    #[test]
    fn test_infer_loader_name() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.YML");
        fs::write(&file, "[]").unwrap();
        let source = DataSource::from(file);

        assert_eq!(infer_loader_name(&source, None).unwrap(), "yml");
        assert_eq!(infer_loader_name(&source, Some("csv")).unwrap(), "csv");
        assert_eq!(infer_loader_name(&source, Some("")).unwrap(), "yml");
    }

    #[test]
    fn test_inline_text_needs_explicit_loader() {
        let source = DataSource::Text("device: r1".to_string());
        let err = infer_loader_name(&source, None).unwrap_err();
        assert!(matches!(err, Error::UnknownDataSource(_)));
        assert!(err.to_string().contains("device: r1"));
    }

    #[test]
    fn test_missing_file_cannot_be_inferred() {
        let source = DataSource::Path(PathBuf::from("/nonexistent/data.csv"));
        assert!(infer_loader_name(&source, None).is_err());
    }
}
