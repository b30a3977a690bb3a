//! Record processors
//!
//! Processors run between loading and rendering, each taking the full ordered record
//! list and returning a new one. They never fail: records a processor cannot handle
//! are dropped with a warning.

pub mod filtering;
pub mod multitemplate;
pub mod templates_split;

pub use filtering::FilteringProcessor;
pub use multitemplate::MultitemplateProcessor;
pub use templates_split::TemplatesSplitProcessor;

use crate::record::Record;

pub const DEFAULT_SPLIT_DELIMITER: &str = ";";

/// Settings shared by every processor in a run
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    pub template_key: String,
    pub result_key: String,
    /// Glob patterns matched against result key values
    pub filters: Vec<String>,
    /// `None` disables template splitting
    pub split_delimiter: Option<String>,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            template_key: "template".to_string(),
            result_key: "device".to_string(),
            filters: Vec::new(),
            split_delimiter: Some(DEFAULT_SPLIT_DELIMITER.to_string()),
        }
    }
}

pub trait Processor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, records: Vec<Record>, options: &ProcessorOptions) -> Vec<Record>;
}
