//! Template storage and lookup
//!
//! Templates are plain text identified by a reference string. The [`TemplateCache`]
//! holds every template loaded during a run, and the [`TemplateResolver`] fills it on
//! demand by walking an ordered chain of [`TemplateLoader`] strategies:
//!
//! 1. already cached
//! 2. packaged collection (`ttr://` references)
//! 3. direct file path
//! 4. file inside the templates directory
//! 5. template tabs of a spreadsheet
//! 6. single `.txt` templates file
//!
//! A reference present in the cache is never reloaded or overwritten.

pub mod collection;
pub mod directory;
pub mod file;
pub mod resolver;
pub mod spreadsheet;

pub use collection::{CollectionLoader, COLLECTION_SCHEME};
pub use directory::DirectoryLoader;
pub use file::{FileLoader, TextFileLoader};
pub use resolver::{ResolverSettings, TemplateResolver};
pub use spreadsheet::SpreadsheetLoader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extension appended to template paths given without one
pub const DEFAULT_EXTENSION: &str = "txt";

/// Template reference to template source text, shared across one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCache {
    templates: HashMap<String, String>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.templates.contains_key(reference)
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.templates.get(reference).map(String::as_str)
    }

    /// Store a template unless the reference is already present.
    ///
    /// Returns `true` when the content was stored.
    pub fn insert_if_absent(&mut self, reference: impl Into<String>, content: impl Into<String>) -> bool {
        let reference = reference.into();
        if self.templates.contains_key(&reference) {
            return false;
        }
        self.templates.insert(reference, content.into());
        true
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template references in sorted order
    pub fn references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl From<HashMap<String, String>> for TemplateCache {
    fn from(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }
}

/// Outcome of a single loader attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The template is now in the cache
    Loaded,
    /// The loader does not apply to this reference or location
    Skipped,
    /// The loader applied but could not produce the template
    Failed(String),
}

/// One step of the template resolution chain
pub trait TemplateLoader: Send + Sync {
    /// Name used in logs and to select the loader explicitly
    fn name(&self) -> &'static str;

    /// Try to place `reference` into `cache`
    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome;
}

/// Return `path` unchanged if it names a file or already carries the default
/// extension, otherwise `path` with `.txt` appended
pub(crate) fn with_default_extension(path: &Path) -> PathBuf {
    let has_default = path
        .extension()
        .is_some_and(|ext| ext == DEFAULT_EXTENSION);
    if path.is_file() || has_default {
        return path.to_path_buf();
    }
    let mut appended = path.as_os_str().to_owned();
    appended.push(".");
    appended.push(DEFAULT_EXTENSION);
    PathBuf::from(appended)
}
