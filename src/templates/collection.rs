//! Templates shipped with the crate, referenced as `ttr://<path>`
//!
//! The packaged collection is compiled into the binary. An optional root directory
//! on disk is searched first, so site templates can extend or shadow it.

use super::{with_default_extension, LoadOutcome, TemplateCache, TemplateLoader, DEFAULT_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COLLECTION_SCHEME: &str = "ttr://";

/// Packaged templates keyed by their path below the collection root
const PACKAGED: &[(&str, &str)] = &[(
    "interfaces.cisco_ios.txt",
    include_str!("../../templates/interfaces.cisco_ios.txt"),
)];

#[derive(Debug, Default)]
pub struct CollectionLoader {
    root: Option<PathBuf>,
}

impl CollectionLoader {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Names of the templates compiled into the binary
    pub fn packaged_names() -> impl Iterator<Item = &'static str> {
        PACKAGED.iter().map(|(name, _)| *name)
    }

    /// Packaged template for `relative`, with or without the `.txt` extension
    pub fn packaged(relative: &str) -> Option<&'static str> {
        let lookup = |name: &str| {
            PACKAGED
                .iter()
                .find(|(packaged, _)| *packaged == name)
                .map(|(_, content)| *content)
        };
        lookup(relative).or_else(|| lookup(&format!("{relative}.{DEFAULT_EXTENSION}")))
    }

    fn read_from_root(root: &Path, relative: &str) -> Option<String> {
        let filepath = with_default_extension(&root.join(relative));
        match fs::read_to_string(&filepath) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = ?filepath, error = %e, "Not in collection root");
                None
            }
        }
    }
}

impl TemplateLoader for CollectionLoader {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
        let Some(relative) = reference.strip_prefix(COLLECTION_SCHEME) else {
            return LoadOutcome::Skipped;
        };

        let content = self
            .root()
            .and_then(|root| Self::read_from_root(root, relative))
            .or_else(|| Self::packaged(relative).map(str::to_string));

        match content {
            Some(content) => {
                debug!(template = %reference, "Loaded template from collection");
                cache.insert_if_absent(reference, content);
                LoadOutcome::Loaded
            }
            None => LoadOutcome::Failed(format!("no collection template '{relative}'")),
        }
    }
}
