use super::{DataLoader, DataSource, LoadContext};
use crate::error::Result;
use crate::record::Record;
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Comma separated rows; the first row names the fields
pub struct CsvLoader;

impl DataLoader for CsvLoader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load(&self, source: &DataSource, _context: &mut LoadContext<'_>) -> Result<Vec<Record>> {
        let records = match source {
            DataSource::Path(path) => read_records(std::fs::File::open(path)?)?,
            DataSource::Text(text) => read_records(text.as_bytes())?,
        };
        debug!(source = %source.describe(), records = records.len(), "Loaded CSV data");
        Ok(records)
    }
}

fn read_records<R: Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = ::csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
                .collect(),
        );
    }
    Ok(records)
}
