//! Split wide rows into one record per suffix group
//!
//! A row can carry several logical records side by side by suffixing column names:
//!
//! | device:a | device:b | interface:a | interface:b | mask | template:a | template:b |
//! |----------|----------|-------------|-------------|------|------------|------------|
//! | r1       | r2       | Eth1        | Eth1        | 24   | interf_cfg | interf_cfg |
//!
//! Suffixes are discovered from columns named `<template key><suffix>`. Columns not
//! ending in any suffix are common and copied into every output record. When a bare
//! template column sits among the common columns, the common columns also form a
//! record of their own, emitted first.

use super::{Processor, ProcessorOptions};
use crate::record::Record;
use tracing::debug;

pub struct MultitemplateProcessor;

impl Processor for MultitemplateProcessor {
    fn name(&self) -> &'static str {
        "multitemplate"
    }

    fn process(&self, records: Vec<Record>, options: &ProcessorOptions) -> Vec<Record> {
        split_suffix_groups(records, &options.template_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SuffixGroup {
    suffix: String,
    keys: Vec<String>,
}

impl SuffixGroup {
    fn extract(&self, record: &Record) -> Record {
        self.keys
            .iter()
            .filter_map(|key| {
                let value = record.get(key)?.clone();
                let name = match key.strip_suffix(self.suffix.as_str()) {
                    Some(stripped) if !self.suffix.is_empty() => stripped,
                    _ => key.as_str(),
                };
                Some((name.to_string(), value))
            })
            .collect()
    }
}

/// Expand every record into one record per suffix group, in input order
pub fn split_suffix_groups(records: Vec<Record>, template_key: &str) -> Vec<Record> {
    let mut output = Vec::with_capacity(records.len());
    let mut previous_keys: Option<Vec<String>> = None;
    let mut groups = Vec::new();

    for record in &records {
        let keys: Vec<String> = record.keys().cloned().collect();
        if previous_keys.as_ref() != Some(&keys) {
            groups = suffix_groups(&keys, template_key);
            debug!(
                suffixes = ?groups.iter().map(|g| g.suffix.as_str()).collect::<Vec<_>>(),
                "Header layout changed"
            );
            previous_keys = Some(keys);
        }
        output.extend(groups.iter().map(|group| group.extract(record)));
    }

    output
}

fn suffix_groups(keys: &[String], template_key: &str) -> Vec<SuffixGroup> {
    let mut suffixes: Vec<&str> = Vec::new();
    for key in keys {
        if let Some(suffix) = key.strip_prefix(template_key) {
            if !suffix.is_empty() && !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }
    }

    let common: Vec<String> = keys
        .iter()
        .filter(|key| !suffixes.iter().any(|suffix| key.ends_with(suffix)))
        .cloned()
        .collect();

    let mut groups = Vec::with_capacity(suffixes.len() + 1);
    if common.iter().any(|key| key == template_key) {
        groups.push(SuffixGroup {
            suffix: String::new(),
            keys: common.clone(),
        });
    }
    for suffix in suffixes {
        let group_keys = common
            .iter()
            .chain(keys.iter().filter(|key| key.ends_with(suffix)))
            .cloned()
            .collect();
        groups.push(SuffixGroup {
            suffix: suffix.to_string(),
            keys: group_keys,
        });
    }

    groups
}
