//! Tera backend for the render engine

use super::{CompiledTemplate, TemplateEngine};
use crate::error::Result;
use crate::record::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tera::{Context, Tera};

static LEADING_BLOCK_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]+(\{%[^+]|\{#)").expect("Invalid regex pattern")
});
static BLOCK_TRAILING_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([%#]\})\r?\n").expect("Invalid regex pattern"));

/// Whitespace handling applied to template source before compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Drop the first newline after a block or comment tag
    pub trim_blocks: bool,
    /// Drop spaces and tabs between the start of a line and a block or comment tag
    pub lstrip_blocks: bool,
    /// Keep a single trailing newline at the end of the template
    pub keep_trailing_newline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim_blocks: true,
            lstrip_blocks: true,
            keep_trailing_newline: false,
        }
    }
}

impl RenderOptions {
    pub fn prepare(&self, source: &str) -> String {
        let mut prepared = source.to_string();
        if self.lstrip_blocks {
            prepared = LEADING_BLOCK_WHITESPACE
                .replace_all(&prepared, "$1")
                .into_owned();
        }
        if !self.keep_trailing_newline {
            if let Some(stripped) = prepared.strip_suffix('\n') {
                prepared = stripped.strip_suffix('\r').unwrap_or(stripped).to_string();
            }
        }
        if self.trim_blocks {
            prepared = BLOCK_TRAILING_NEWLINE
                .replace_all(&prepared, "$1")
                .into_owned();
        }
        prepared
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeraEngine {
    options: RenderOptions,
}

impl TeraEngine {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl TemplateEngine for TeraEngine {
    fn name(&self) -> &'static str {
        "tera"
    }

    fn compile(&self, reference: &str, source: &str) -> Result<Box<dyn CompiledTemplate>> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]); // configuration text, never HTML
        tera.add_raw_template(reference, &self.options.prepare(source))?;

        Ok(Box::new(TeraTemplate {
            tera,
            name: reference.to_string(),
        }))
    }
}

struct TeraTemplate {
    tera: Tera,
    name: String,
}

impl CompiledTemplate for TeraTemplate {
    fn render(&self, record: &Record) -> Result<String> {
        let context = Context::from_serialize(record)?;
        Ok(self.tera.render(&self.name, &context)?)
    }
}
