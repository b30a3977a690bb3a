use super::{DataLoader, DataSource, LoadContext};
use crate::error::{Error, Result};
use crate::record::Record;
use serde_json::Value;
use tracing::debug;

/// A YAML list of mappings, or a single mapping, from a file or inline text
pub struct YamlLoader;

impl DataLoader for YamlLoader {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn load(&self, source: &DataSource, _context: &mut LoadContext<'_>) -> Result<Vec<Record>> {
        let text = source.read_to_string()?;
        let records = parse_records(&text)?;
        debug!(source = %source.describe(), records = records.len(), "Loaded YAML data");
        Ok(records)
    }
}

pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_yaml::from_str::<Value>(text)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Record::from_value(item).ok_or_else(|| {
                    Error::Load(format!("YAML data item #{index} is not a mapping"))
                })
            })
            .collect(),
        value @ Value::Object(_) => Ok(Record::from_value(value).into_iter().collect()),
        other => Err(Error::Load(format!(
            "YAML data must be a list of mappings, got: {other}"
        ))),
    }
}
