//! Templates looked up by name inside a templates directory

use super::{with_default_extension, LoadOutcome, TemplateCache, TemplateLoader};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct DirectoryLoader {
    location: PathBuf,
}

impl DirectoryLoader {
    pub fn new(location: PathBuf) -> Self {
        Self { location }
    }
}

impl TemplateLoader for DirectoryLoader {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
        if !self.location.is_dir() {
            return LoadOutcome::Skipped;
        }

        let filepath = with_default_extension(&self.location.join(reference));
        debug!(template = %reference, path = ?filepath, "Loading template from directory");

        match fs::read_to_string(&filepath) {
            Ok(content) => {
                cache.insert_if_absent(reference, content);
                LoadOutcome::Loaded
            }
            Err(e) => LoadOutcome::Failed(format!(
                "failed to open '{reference}' in {}; formed path {}: {e}",
                self.location.display(),
                filepath.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exact_name_and_default_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("interfaces.cisco_ios.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("bgp"), "b").unwrap();
        let loader = DirectoryLoader::new(temp_dir.path().to_path_buf());

        let mut cache = TemplateCache::new();
        assert_eq!(loader.load("interfaces.cisco_ios", &mut cache), LoadOutcome::Loaded);
        assert_eq!(loader.load("bgp", &mut cache), LoadOutcome::Loaded);
        assert_eq!(cache.get("interfaces.cisco_ios"), Some("a"));
        assert_eq!(cache.get("bgp"), Some("b"));
    }

    #[test]
    fn test_nested_reference() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("juniper")).unwrap();
        fs::write(temp_dir.path().join("juniper").join("system.txt"), "c").unwrap();
        let loader = DirectoryLoader::new(temp_dir.path().to_path_buf());

        let mut cache = TemplateCache::new();
        assert_eq!(loader.load("juniper/system", &mut cache), LoadOutcome::Loaded);
        assert_eq!(cache.get("juniper/system"), Some("c"));
    }

    #[test]
    fn test_missing_template_fails_and_file_location_skips() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = TemplateCache::new();

        let loader = DirectoryLoader::new(temp_dir.path().to_path_buf());
        assert!(matches!(loader.load("nope", &mut cache), LoadOutcome::Failed(_)));

        let file = temp_dir.path().join("templates.xlsx");
        fs::write(&file, "").unwrap();
        let loader = DirectoryLoader::new(file);
        assert_eq!(loader.load("nope", &mut cache), LoadOutcome::Skipped);
    }
}
