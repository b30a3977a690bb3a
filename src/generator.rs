//! Pipeline orchestration
//!
//! A [`Generator`] owns one template cache and one record set and drives them through
//! load, process, validate, render and return. The template cache survives across
//! loads and runs, so templates loaded once are never read again.

use crate::config::GeneratorConfig;
use crate::data::{infer_loader_name, DataSource, LoadContext};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::registry::PluginRegistry;
use crate::render::{render_records, RenderKeys, RenderResults};
use crate::templates::spreadsheet::{is_spreadsheet, load_template_tabs};
use crate::templates::{ResolverSettings, TemplateCache, TemplateResolver};
use crate::validate::ModelRegistry;
use std::path::Path;
use tracing::{debug, info};

pub struct Generator {
    config: GeneratorConfig,
    registry: PluginRegistry,
    resolver: TemplateResolver,
    templates: TemplateCache,
    models: ModelRegistry,
    records: Vec<Record>,
    results: RenderResults,
}

impl Generator {
    /// Generator with the built-in plugins. Models are loaded from `models_dir` when set.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let registry = PluginRegistry::builtin(config.render.clone());
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: GeneratorConfig, registry: PluginRegistry) -> Result<Self> {
        let models = match &config.models_dir {
            Some(dir) => ModelRegistry::load_dir(dir)?,
            None => ModelRegistry::new(),
        };
        let resolver = TemplateResolver::new(&config.resolver_settings());
        debug!(loaders = ?resolver.loader_names(), "Template resolution chain");
        Ok(Self {
            resolver,
            config,
            registry,
            templates: TemplateCache::new(),
            models,
            records: Vec::new(),
            results: RenderResults::default(),
        })
    }

    /// Seed the template cache
    pub fn with_templates(mut self, templates: TemplateCache) -> Self {
        self.templates = templates;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Results of the last run
    pub fn results(&self) -> &RenderResults {
        &self.results
    }

    /// Load and process `source`, replacing any previously loaded records
    pub fn load_data(&mut self, source: DataSource, loader: Option<&str>) -> Result<&[Record]> {
        self.records = self.load_source(&source, loader)?;
        Ok(&self.records)
    }

    /// Load and process `source`, appending its records to those already loaded
    pub fn extend_data(&mut self, source: DataSource, loader: Option<&str>) -> Result<&[Record]> {
        let records = self.load_source(&source, loader)?;
        self.records.extend(records);
        Ok(&self.records)
    }

    fn load_source(&mut self, source: &DataSource, loader: Option<&str>) -> Result<Vec<Record>> {
        let name = infer_loader_name(source, loader.or(self.config.data_loader.as_deref()))?;
        let data_loader = self.registry.data_loader(&name)?;
        debug!(loader = %name, source = %source.describe(), "Loading data");

        let mut context = LoadContext {
            template_key: &self.config.template_key,
            templates: &mut self.templates,
        };
        let mut records = data_loader.load(source, &mut context)?;

        let options = self.config.processor_options();
        for processor_name in &self.config.processors {
            let processor = self.registry.processor(processor_name)?;
            let before = records.len();
            records = processor.process(records, &options);
            debug!(
                processor = %processor_name,
                before,
                after = records.len(),
                "Processed records"
            );
        }

        Ok(records)
    }

    /// Register template text under `name`; an existing template is kept
    pub fn add_template(&mut self, name: &str, text: &str) -> bool {
        self.templates.insert_if_absent(name, text)
    }

    /// Load templates outside of a run.
    ///
    /// With a `reference`, resolve it through the full chain or through the loader
    /// named by `loader`, using `location` in place of the configured templates
    /// location when given. Without a reference, load every template tab of a
    /// spreadsheet location. Returns whether the cache gained the requested templates.
    pub fn load_templates(
        &mut self,
        reference: Option<&str>,
        location: Option<&Path>,
        loader: Option<&str>,
    ) -> Result<bool> {
        let scoped;
        let resolver = match location {
            Some(location) => {
                scoped = TemplateResolver::new(&ResolverSettings {
                    templates: Some(location.to_path_buf()),
                    collection_root: self.config.collection_root.clone(),
                });
                &scoped
            }
            None => &self.resolver,
        };

        match (reference, loader) {
            (Some(reference), Some(loader)) => {
                resolver.resolve_with(loader, reference, &mut self.templates)
            }
            (Some(reference), None) => Ok(resolver.resolve(reference, &mut self.templates)),
            (None, _) => {
                let location = location.unwrap_or(self.config.templates.as_path());
                if !is_spreadsheet(location) {
                    return Err(Error::Load(format!(
                        "loading all templates needs a spreadsheet location, got {}",
                        location.display()
                    )));
                }
                Ok(load_template_tabs(location, &mut self.templates)? > 0)
            }
        }
    }

    /// Load model files from `dir`, adding to those already known
    pub fn load_models(&mut self, dir: &Path) -> Result<usize> {
        let loaded = ModelRegistry::load_dir(dir)?;
        let count = loaded.len();
        self.models.extend(loaded);
        Ok(count)
    }

    /// Render the loaded records and hand the results to the configured returner
    pub fn run(&mut self) -> Result<&RenderResults> {
        let engine = self.registry.engine(&self.config.renderer)?;
        let returner = self.registry.returner(&self.config.returner)?;

        let records = if self.models.is_empty() {
            self.records.clone()
        } else {
            self.models.validate_records(
                self.records.clone(),
                &self.config.model_key,
                self.config.on_validation_failure,
            )?
        };

        let keys = RenderKeys {
            template_key: &self.config.template_key,
            result_key: &self.config.result_key,
        };
        let results = render_records(
            &records,
            keys,
            &self.resolver,
            &mut self.templates,
            engine.as_ref(),
        )?;

        debug!(returner = returner.name(), "Returning results");
        returner.dispatch(&results, &self.config.return_options())?;
        info!(results = results.len(), records = records.len(), "Rendering completed");

        self.results = results;
        Ok(&self.results)
    }
}
