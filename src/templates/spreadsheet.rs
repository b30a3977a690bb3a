//! Templates kept in spreadsheet tabs
//!
//! Any worksheet whose name contains `TEMPLATE` (case-insensitive) holds templates in
//! its first column, no header row required:
//!
//! | A                               |
//! |---------------------------------|
//! | template:interface              |
//! | interface {{ interface }}       |
//! |  description {{ description }}  |
//! | template:logging                |
//! | logging host {{ log_server }}   |
//!
//! A `template:<name>` cell closes the previous template and opens the next one.
//! Worksheets whose name starts with `#` are ignored.

use super::{LoadOutcome, TemplateCache, TemplateLoader};
use crate::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TEMPLATE_MARKER: &str = "TEMPLATE";

/// Resolves references from the template tabs of a spreadsheet templates location
pub struct SpreadsheetLoader {
    location: PathBuf,
}

impl SpreadsheetLoader {
    pub fn new(location: PathBuf) -> Self {
        Self { location }
    }
}

impl TemplateLoader for SpreadsheetLoader {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn load(&self, reference: &str, cache: &mut TemplateCache) -> LoadOutcome {
        if !is_spreadsheet(&self.location) {
            return LoadOutcome::Skipped;
        }

        match load_template_tabs(&self.location, cache) {
            Ok(count) => {
                debug!(
                    path = ?self.location,
                    loaded = count,
                    "Loaded templates from spreadsheet"
                );
            }
            Err(e) => return LoadOutcome::Failed(e.to_string()),
        }

        if cache.contains(reference) {
            LoadOutcome::Loaded
        } else {
            LoadOutcome::Failed(format!(
                "no '{reference}' template in {}",
                self.location.display()
            ))
        }
    }
}

pub fn is_spreadsheet(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Worksheet names signalling a tab of templates
pub fn is_template_sheet(name: &str) -> bool {
    !name.starts_with('#') && name.to_uppercase().contains(TEMPLATE_MARKER)
}

/// Load every template tab of the workbook at `path` into `cache`.
///
/// Returns the number of templates newly stored.
pub fn load_template_tabs(path: &Path, cache: &mut TemplateCache) -> Result<usize> {
    let mut workbook = open_workbook_auto(path)?;
    let mut stored = 0;

    for sheet_name in workbook.sheet_names() {
        if !is_template_sheet(&sheet_name) {
            continue;
        }
        debug!(sheet = %sheet_name, "Loading templates tab");
        let range = workbook.worksheet_range(&sheet_name)?;
        stored += parse_template_cells(range.rows().map(|row| row.first()), cache);
    }

    Ok(stored)
}

/// Parse the first-column cells of a templates tab.
///
/// Returns the number of templates newly stored.
pub fn parse_template_cells<'a, I>(cells: I, cache: &mut TemplateCache) -> usize
where
    I: IntoIterator<Item = Option<&'a Data>>,
{
    let mut stored = 0;
    let mut current_name = String::new();
    let mut current_lines: Vec<String> = Vec::new();

    for cell in cells {
        let Some(text) = cell.and_then(cell_text) else {
            continue;
        };
        if let Some(name) = template_name(&text) {
            stored += flush(&current_name, &mut current_lines, cache);
            current_name = name.to_string();
        } else {
            current_lines.push(text);
        }
    }
    stored += flush(&current_name, &mut current_lines, cache);

    stored
}

fn flush(name: &str, lines: &mut Vec<String>, cache: &mut TemplateCache) -> usize {
    let body = std::mem::take(lines);
    if name.is_empty() || body.is_empty() {
        return 0;
    }
    usize::from(cache.insert_if_absent(name, body.join("\n")))
}

/// `template:<name>` marker cell, matched case-insensitively
fn template_name(text: &str) -> Option<&str> {
    let marker_len = TEMPLATE_MARKER.len();
    let head = text.get(..marker_len)?;
    if !head.eq_ignore_ascii_case(TEMPLATE_MARKER) {
        return None;
    }
    text[marker_len..].strip_prefix(':').map(str::trim)
}

/// Cell content as text, `None` for empty cells
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell_value(cell) {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Convert a cell to a record value; whole-number floats become integers
pub(crate) fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => float_value(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(format!("{e:?}")),
    }
}

fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Value::from(f as i64)
    } else {
        Value::from(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Data> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    Data::Empty
                } else {
                    Data::String(v.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_parse_template_cells() {
        let column = cells(&[
            "template:interface",
            "interface {{ interface }}",
            "",
            " description {{ description }}",
            "TEMPLATE: logging ",
            "logging host {{ log_server }}",
        ]);
        let mut cache = TemplateCache::new();

        let stored = parse_template_cells(column.iter().map(Some), &mut cache);

        assert_eq!(stored, 2);
        assert_eq!(
            cache.get("interface"),
            Some("interface {{ interface }}\n description {{ description }}")
        );
        assert_eq!(cache.get("logging"), Some("logging host {{ log_server }}"));
    }

    #[test]
    fn test_lines_before_first_marker_and_empty_templates_dropped() {
        let column = cells(&["orphan line", "template:empty", "template:ntp", "ntp server {{ ntp }}"]);
        let mut cache = TemplateCache::new();

        parse_template_cells(column.iter().map(Some), &mut cache);

        assert_eq!(cache.references(), vec!["ntp"]);
    }

    #[test]
    fn test_existing_templates_not_overwritten() {
        let mut cache = TemplateCache::new();
        cache.insert_if_absent("ntp", "inline");
        let column = cells(&["template:ntp", "from sheet"]);

        let stored = parse_template_cells(column.iter().map(Some), &mut cache);

        assert_eq!(stored, 0);
        assert_eq!(cache.get("ntp"), Some("inline"));
    }

    #[test]
    fn test_template_sheet_names() {
        assert!(is_template_sheet("templates"));
        assert!(is_template_sheet("Core Template Tab"));
        assert!(!is_template_sheet("#templates"));
        assert!(!is_template_sheet("interfaces"));
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Float(100.0)), Value::from(100));
        assert_eq!(cell_value(&Data::Float(1.5)), Value::from(1.5));
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_text(&Data::Int(24)), Some("24".to_string()));
        assert_eq!(cell_text(&Data::String(String::new())), None);
    }
}
