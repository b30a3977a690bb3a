//! Templates read straight from a file path

use super::{LoadOutcome, TemplateCache, TemplateLoader};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads a reference that is itself a path to an existing file
pub struct FileLoader;

impl TemplateLoader for FileLoader {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
        let path = Path::new(reference);
        if !path.is_file() {
            return LoadOutcome::Skipped;
        }
        read_into(path, reference, cache)
    }
}

/// Loads the content of a single `.txt` templates location under any reference
pub struct TextFileLoader {
    location: PathBuf,
}

impl TextFileLoader {
    pub fn new(location: PathBuf) -> Self {
        Self { location }
    }
}

impl TemplateLoader for TextFileLoader {
    fn name(&self) -> &'static str {
        "text"
    }

    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
        let is_text = self
            .location
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(super::DEFAULT_EXTENSION));
        if !is_text || !self.location.is_file() {
            return LoadOutcome::Skipped;
        }
        read_into(&self.location, reference, cache)
    }
}

fn read_into(path: &Path, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
    match fs::read_to_string(path) {
        Ok(content) => {
            cache.insert_if_absent(reference, content);
            LoadOutcome::Loaded
        }
        Err(e) => LoadOutcome::Failed(format!("failed to read {}: {e}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_reference_loaded_under_reference() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("base.txt");
        fs::write(&path, "hostname {{ hostname }}").unwrap();
        let reference = path.to_string_lossy().to_string();

        let mut cache = TemplateCache::new();
        assert_eq!(FileLoader.load(&reference, &mut cache), LoadOutcome::Loaded);
        assert_eq!(cache.get(&reference), Some("hostname {{ hostname }}"));
    }

    #[test]
    fn test_non_file_reference_skipped() {
        let mut cache = TemplateCache::new();
        assert_eq!(
            FileLoader.load("no/such/template", &mut cache),
            LoadOutcome::Skipped
        );
    }

    #[test]
    fn test_text_location_serves_any_reference() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("single.txt");
        fs::write(&path, "ntp server {{ ntp }}").unwrap();

        let loader = TextFileLoader::new(path);
        let mut cache = TemplateCache::new();
        assert_eq!(loader.load("ntp", &mut cache), LoadOutcome::Loaded);
        assert_eq!(cache.get("ntp"), Some("ntp server {{ ntp }}"));
    }

    #[test]
    fn test_text_loader_ignores_directories() {
        let temp_dir = TempDir::new().unwrap();
        let loader = TextFileLoader::new(temp_dir.path().to_path_buf());
        let mut cache = TemplateCache::new();
        assert_eq!(loader.load("ntp", &mut cache), LoadOutcome::Skipped);
    }
}
