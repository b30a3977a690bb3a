//! Named plugin lookup
//!
//! The generator resolves every configurable stage (data loader, processor, template
//! engine, returner) by name through a [`PluginRegistry`] handed to it at construction.

use crate::data::{CsvLoader, DataLoader, XlsxLoader, YamlLoader};
use crate::error::{Error, Result};
use crate::processors::{
    FilteringProcessor, MultitemplateProcessor, Processor, TemplatesSplitProcessor,
};
use crate::render::{RenderOptions, TemplateEngine, TeraEngine};
use crate::returners::{FileReturner, Returner, SelfReturner, TerminalReturner};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct PluginRegistry {
    data_loaders: HashMap<String, Arc<dyn DataLoader>>,
    processors: HashMap<String, Arc<dyn Processor>>,
    engines: HashMap<String, Arc<dyn TemplateEngine>>,
    returners: HashMap<String, Arc<dyn Returner>>,
}

impl PluginRegistry {
    /// Registry without any plugins
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in plugins with default render options
    pub fn with_defaults() -> Self {
        Self::builtin(RenderOptions::default())
    }

    pub fn builtin(render_options: RenderOptions) -> Self {
        let mut registry = Self::empty();

        let yaml: Arc<dyn DataLoader> = Arc::new(YamlLoader);
        registry.register_data_loader("csv", Arc::new(CsvLoader));
        registry.register_data_loader("xlsx", Arc::new(XlsxLoader));
        registry.register_data_loader("yaml", yaml.clone());
        registry.register_data_loader("yml", yaml);

        registry.register_processor(Arc::new(MultitemplateProcessor));
        registry.register_processor(Arc::new(FilteringProcessor));
        registry.register_processor(Arc::new(TemplatesSplitProcessor));

        registry.register_engine(Arc::new(TeraEngine::new(render_options)));

        registry.register_returner(Arc::new(SelfReturner));
        registry.register_returner(Arc::new(FileReturner));
        registry.register_returner(Arc::new(TerminalReturner));

        registry
    }

    pub fn register_data_loader(&mut self, name: impl Into<String>, loader: Arc<dyn DataLoader>) {
        self.data_loaders.insert(name.into(), loader);
    }

    pub fn register_processor(&mut self, processor: Arc<dyn Processor>) {
        self.processors
            .insert(processor.name().to_string(), processor);
    }

    pub fn register_engine(&mut self, engine: Arc<dyn TemplateEngine>) {
        self.engines.insert(engine.name().to_string(), engine);
    }

    pub fn register_returner(&mut self, returner: Arc<dyn Returner>) {
        self.returners.insert(returner.name().to_string(), returner);
    }

    pub fn data_loader(&self, name: &str) -> Result<Arc<dyn DataLoader>> {
        lookup(&self.data_loaders, "data loader", name)
    }

    pub fn processor(&self, name: &str) -> Result<Arc<dyn Processor>> {
        lookup(&self.processors, "processor", name)
    }

    pub fn engine(&self, name: &str) -> Result<Arc<dyn TemplateEngine>> {
        lookup(&self.engines, "renderer", name)
    }

    pub fn returner(&self, name: &str) -> Result<Arc<dyn Returner>> {
        lookup(&self.returners, "returner", name)
    }

    pub fn data_loader_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.data_loaders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn lookup<T: ?Sized>(
    plugins: &HashMap<String, Arc<T>>,
    kind: &'static str,
    name: &str,
) -> Result<Arc<T>> {
    plugins
        .get(name)
        .cloned()
        .ok_or_else(|| Error::plugin_not_found(kind, name))
}
