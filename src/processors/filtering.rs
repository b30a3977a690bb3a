//! Keep only records whose result key matches a glob pattern

use super::{Processor, ProcessorOptions};
use crate::record::Record;
use glob::Pattern;
use tracing::warn;

pub struct FilteringProcessor;

impl Processor for FilteringProcessor {
    fn name(&self) -> &'static str {
        "filtering"
    }

    fn process(&self, records: Vec<Record>, options: &ProcessorOptions) -> Vec<Record> {
        filter_records(records, &options.result_key, &options.filters)
    }
}

/// Filter `records` against shell-style, case-sensitive `patterns`.
///
/// Without any non-empty pattern the records are returned untouched.
pub fn filter_records(records: Vec<Record>, result_key: &str, patterns: &[String]) -> Vec<Record> {
    if patterns.iter().all(|p| p.is_empty()) {
        return records;
    }

    let compiled: Vec<Pattern> = patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| compile(p))
        .collect();

    records
        .into_iter()
        .filter(|record| match record.get_str(result_key) {
            Some(name) => compiled.iter().any(|pattern| pattern.matches(name)),
            None => {
                warn!(
                    result_key = %result_key,
                    record = ?record,
                    "Filtering: result key value is not a string, dropping record"
                );
                false
            }
        })
        .collect()
}

/// Compile a shell-style pattern with `fnmatch` semantics.
///
/// Runs of `*` act as one `*` and a `[` without a closing `]` is a literal.
fn compile(pattern: &str) -> Pattern {
    let translated = to_glob(pattern);
    Pattern::new(&translated).unwrap_or_else(|e| {
        warn!(pattern = %pattern, error = %e, "Matching filter pattern literally");
        Pattern::new(&Pattern::escape(pattern)).unwrap_or_default()
    })
}

fn to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                glob.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    glob.extend(&chars[i..=end]);
                    i = end;
                }
                None => glob.push_str("[[]"),
            },
            c => glob.push(c),
        }
        i += 1;
    }

    glob
}

/// Index of the `]` closing the class opened at `start`; a `]` right after
/// `[` or `[!` belongs to the class
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut first = start + 1;
    if chars.get(first) == Some(&'!') {
        first += 1;
    }
    if chars.get(first) == Some(&']') {
        first += 1;
    }
    chars
        .get(first..)?
        .iter()
        .position(|c| *c == ']')
        .map(|offset| first + offset)
}
