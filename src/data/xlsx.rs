//! Spreadsheet workbooks
//!
//! Every worksheet is visited in workbook order:
//!
//! - names starting with `#` are skipped
//! - names containing `TEMPLATE` are template tabs, loaded into the template cache
//! - all other tabs are data: the first row is the header, each further row a record
//!
//! Columns whose header is empty or starts with `#` are ignored. A data tab without a
//! template column is skipped with a warning.

use super::{DataLoader, DataSource, LoadContext};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::templates::spreadsheet::{cell_text, cell_value, is_template_sheet, parse_template_cells};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use tracing::{debug, warn};

pub struct XlsxLoader;

impl DataLoader for XlsxLoader {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn load(&self, source: &DataSource, context: &mut LoadContext<'_>) -> Result<Vec<Record>> {
        let path = source.path().ok_or_else(|| {
            Error::Load(format!(
                "xlsx loader needs a spreadsheet file, got {}",
                source.describe()
            ))
        })?;
        let mut workbook = open_workbook_auto(path)?;
        let mut records = Vec::new();

        for sheet_name in workbook.sheet_names() {
            if sheet_name.starts_with('#') {
                debug!(sheet = %sheet_name, "Skipping tab");
                continue;
            }
            let range = workbook.worksheet_range(&sheet_name)?;
            if is_template_sheet(&sheet_name) {
                let stored =
                    parse_template_cells(range.rows().map(|row| row.first()), context.templates);
                debug!(sheet = %sheet_name, stored, "Loaded templates tab");
            } else if let Some(rows) =
                records_from_rows(&sheet_name, range.rows(), context.template_key)
            {
                records.extend(rows);
            }
        }

        Ok(records)
    }
}

/// Records of one data tab, `None` when the tab has no template column
pub fn records_from_rows<'a, I>(sheet_name: &str, rows: I, template_key: &str) -> Option<Vec<Record>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header_row = rows.next().unwrap_or_default();
    let headers: Vec<(usize, String)> = header_row
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| Some((column, cell_text(cell)?)))
        .filter(|(_, header)| !header.starts_with('#'))
        .collect();

    if !headers.iter().any(|(_, h)| h.starts_with(template_key)) {
        warn!(sheet = %sheet_name, template_key = %template_key, "No template column on tab, skipping it");
        return None;
    }

    debug!(
        sheet = %sheet_name,
        headers = ?headers.iter().map(|(_, h)| h.as_str()).collect::<Vec<_>>(),
        "Loading data tab"
    );

    let records = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .map(|(column, header)| {
                    let value = row.get(*column).map(cell_value).unwrap_or(Value::Null);
                    (header.clone(), value)
                })
                .collect()
        })
        .collect();

    Some(records)
}
