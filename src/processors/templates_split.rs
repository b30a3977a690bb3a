//! Expand `template: "a; b"` into one record per template name

use super::{Processor, ProcessorOptions};
use crate::record::Record;

pub struct TemplatesSplitProcessor;

impl Processor for TemplatesSplitProcessor {
    fn name(&self) -> &'static str {
        "templates_split"
    }

    fn process(&self, records: Vec<Record>, options: &ProcessorOptions) -> Vec<Record> {
        split_templates(
            records,
            &options.template_key,
            options.split_delimiter.as_deref(),
        )
    }
}

/// Records without a string template value are dropped
pub fn split_templates(
    records: Vec<Record>,
    template_key: &str,
    delimiter: Option<&str>,
) -> Vec<Record> {
    let mut output = Vec::with_capacity(records.len());

    for record in records {
        let Some(templates) = record.get_str(template_key).map(str::to_string) else {
            continue;
        };
        match delimiter.filter(|d| !d.is_empty() && templates.contains(*d)) {
            Some(delimiter) => {
                // each copy carries its template name as the last field
                let mut base = record;
                base.remove(template_key);
                for name in templates.split(delimiter) {
                    output.push(base.clone().with(template_key, name.trim()));
                }
            }
            None => output.push(record),
        }
    }

    output
}
