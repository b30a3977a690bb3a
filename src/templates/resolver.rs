use super::{
    CollectionLoader, DirectoryLoader, FileLoader, LoadOutcome, SpreadsheetLoader, TemplateCache,
    TemplateLoader, TextFileLoader,
};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Locations the default resolution chain searches
#[derive(Debug, Clone, Default)]
pub struct ResolverSettings {
    /// Directory, `.xlsx` spreadsheet or `.txt` file holding templates
    pub templates: Option<PathBuf>,
    /// Directory searched for `ttr://` templates before the packaged collection
    pub collection_root: Option<PathBuf>,
}

/// Ordered chain of template loaders, stopping at the first success
pub struct TemplateResolver {
    loaders: Vec<Box<dyn TemplateLoader>>,
}

impl TemplateResolver {
    pub fn new(settings: &ResolverSettings) -> Self {
        let mut loaders: Vec<Box<dyn TemplateLoader>> = vec![
            Box::new(CollectionLoader::new(settings.collection_root.clone())),
            Box::new(FileLoader),
        ];
        if let Some(location) = &settings.templates {
            loaders.push(Box::new(DirectoryLoader::new(location.clone())));
            loaders.push(Box::new(SpreadsheetLoader::new(location.clone())));
            loaders.push(Box::new(TextFileLoader::new(location.clone())));
        }
        Self::from_loaders(loaders)
    }

    pub fn from_loaders(loaders: Vec<Box<dyn TemplateLoader>>) -> Self {
        Self { loaders }
    }

    pub fn loader_names(&self) -> Vec<&'static str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    /// Ensure `cache` holds `reference`.
    ///
    /// Returns `false` when no loader could produce it; the failure is logged.
    pub fn resolve(&self, reference: &str, cache: &mut TemplateCache) -> bool {
        if cache.contains(reference) {
            return true;
        }
        if reference.is_empty() {
            warn!("Invalid empty template reference");
            return false;
        }

        let mut failures = Vec::new();
        for loader in &self.loaders {
            match loader.load(reference, cache) {
                LoadOutcome::Loaded => {
                    debug!(template = %reference, loader = loader.name(), "Template loaded");
                    return true;
                }
                LoadOutcome::Skipped => {}
                LoadOutcome::Failed(reason) => failures.push(format!("{}: {reason}", loader.name())),
            }
        }

        error!(
            template = %reference,
            failures = ?failures,
            "Failed to load template; templates location should be a directory, .xlsx or .txt file"
        );
        false
    }

    /// Resolve through one named loader only
    pub fn resolve_with(
        &self,
        loader_name: &str,
        reference: &str,
        cache: &mut TemplateCache,
    ) -> Result<bool> {
        let loader = self
            .loaders
            .iter()
            .find(|l| l.name() == loader_name)
            .ok_or_else(|| Error::plugin_not_found("template loader", loader_name))?;

        if cache.contains(reference) {
            return Ok(true);
        }
        Ok(match loader.load(reference, cache) {
            LoadOutcome::Loaded => true,
            LoadOutcome::Skipped => {
                warn!(template = %reference, loader = loader_name, "Loader does not apply");
                false
            }
            LoadOutcome::Failed(reason) => {
                error!(template = %reference, loader = loader_name, %reason, "Failed to load template");
                false
            }
        })
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new(&ResolverSettings::default())
    }
}
