//! Render engine
//!
//! Pairs every record with its template, renders it and groups the output by the
//! record's result key. Per-record problems (unresolvable template, template syntax
//! error, render failure) are logged and the record is skipped; only a record without
//! a result key aborts the run, because its output would have nowhere to go.

pub mod tera;

pub use self::tera::{RenderOptions, TeraEngine};

use crate::error::{Error, Result};
use crate::record::{scalar_to_string, Record};
use crate::templates::{TemplateCache, TemplateResolver};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error};

/// Templating backend: compile source text once, render it many times
pub trait TemplateEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn compile(&self, reference: &str, source: &str) -> Result<Box<dyn CompiledTemplate>>;
}

pub trait CompiledTemplate {
    /// Render against a record; every field is visible to the template
    fn render(&self, record: &Record) -> Result<String>;
}

/// Field names carrying each record's template reference and result bucket
#[derive(Debug, Clone, Copy)]
pub struct RenderKeys<'a> {
    pub template_key: &'a str,
    pub result_key: &'a str,
}

/// Rendered text per result key, in first-seen key order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderResults(IndexMap<String, String>);

impl RenderResults {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderResults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fragments accumulated per result key while rendering
#[derive(Debug, Default)]
struct ResultBuckets(IndexMap<String, Vec<String>>);

impl ResultBuckets {
    fn bucket(&mut self, key: String) -> &mut Vec<String> {
        self.0.entry(key).or_default()
    }

    fn finalize(self) -> RenderResults {
        RenderResults(
            self.0
                .into_iter()
                .map(|(key, fragments)| (key, fragments.join("\n")))
                .collect(),
        )
    }
}

/// Render `records` in order, resolving templates through `resolver` into `cache`
pub fn render_records(
    records: &[Record],
    keys: RenderKeys<'_>,
    resolver: &TemplateResolver,
    cache: &mut TemplateCache,
    engine: &dyn TemplateEngine,
) -> Result<RenderResults> {
    let mut buckets = ResultBuckets::default();
    let mut compiled: HashMap<String, Box<dyn CompiledTemplate>> = HashMap::new();

    debug!(records = records.len(), engine = engine.name(), "Rendering records");

    for (index, record) in records.iter().enumerate() {
        let result_name = record
            .get(keys.result_key)
            .and_then(scalar_to_string)
            .ok_or_else(|| Error::MissingResultKey {
                index,
                key: keys.result_key.to_string(),
            })?;
        let bucket = buckets.bucket(result_name);

        let reference = record
            .get(keys.template_key)
            .and_then(scalar_to_string)
            .unwrap_or_default();

        if !resolver.resolve(&reference, cache) {
            error!(template = %reference, record = index, "Failed to load template, skipping record");
            continue;
        }

        if !compiled.contains_key(&reference) {
            let Some(source) = cache.get(&reference) else {
                continue;
            };
            match engine.compile(&reference, source) {
                Ok(template) => {
                    compiled.insert(reference.clone(), template);
                }
                Err(e) => {
                    error!(template = %reference, error = %error_chain(&e), "Failed to compile template");
                    continue;
                }
            }
        }

        let Some(template) = compiled.get(&reference) else {
            continue;
        };
        match template.render(record) {
            Ok(text) => bucket.push(text),
            Err(e) => {
                error!(
                    template = %reference,
                    error = %error_chain(&e),
                    record = ?record,
                    "Failed to render template"
                );
            }
        }
    }

    Ok(buckets.finalize())
}

/// Error message followed by every source in its chain
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
