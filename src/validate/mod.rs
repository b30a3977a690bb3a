//! Record validation against data models
//!
//! A model is a YAML file describing the fields a record must carry:
//!
//! ```yaml
//! name: interface
//! required: [device, interface, vid]
//! types:
//!   vid: integer
//!   description: string
//! ```
//!
//! Records opt in by naming a model under the model key (`model` by default).

use crate::error::{Error, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

pub const DEFAULT_MODEL_KEY: &str = "model";

pub trait Validator: Send + Sync {
    fn validate(&self, record: &Record) -> Result<()>;
}

/// What to do with a record that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Abort the run
    #[default]
    Raise,
    /// Log the failure and drop the record
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub types: BTreeMap<String, FieldType>,
}

impl Validator for Model {
    fn validate(&self, record: &Record) -> Result<()> {
        let mut problems = Vec::new();

        for field in &self.required {
            if record.get(field).is_none_or(Value::is_null) {
                problems.push(format!("missing required field '{field}'"));
            }
        }
        for (field, expected) in &self.types {
            if let Some(value) = record.get(field).filter(|v| !v.is_null()) {
                if !expected.matches(value) {
                    problems.push(format!("field '{field}' is not {expected:?}: {value}"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "model '{}': {}",
                self.name,
                problems.join("; ")
            )))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Model>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.yaml` / `*.yml` model file in `dir`
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "models directory not found: {}",
                dir.display()
            )));
        }

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| matches!(ext, "yaml" | "yml"))
            })
            .collect();
        paths.sort();

        for path in paths {
            let model: Model = serde_yaml::from_str(&fs::read_to_string(&path)?)?;
            debug!(model = %model.name, path = ?path, "Loaded model");
            registry.insert(model);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, model: Model) {
        self.models.insert(model.name.clone(), model);
    }

    /// Add every model of `other`, replacing same-named ones
    pub fn extend(&mut self, other: ModelRegistry) {
        self.models.extend(other.models);
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Validate records naming a model under `model_key`.
    ///
    /// Records without a model, or naming an unknown one, pass through.
    pub fn validate_records(
        &self,
        records: Vec<Record>,
        model_key: &str,
        policy: ValidationPolicy,
    ) -> Result<Vec<Record>> {
        let mut valid = Vec::with_capacity(records.len());

        for record in records {
            let Some(name) = record.get_str(model_key) else {
                valid.push(record);
                continue;
            };
            let Some(model) = self.get(name) else {
                warn!(model = %name, "Unknown model, skipping validation");
                valid.push(record);
                continue;
            };
            match model.validate(&record) {
                Ok(()) => valid.push(record),
                Err(e) if policy == ValidationPolicy::Raise => return Err(e),
                Err(e) => error!(error = %e, record = ?record, "Record failed validation"),
            }
        }

        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn interface_model() -> Model {
        serde_yaml::from_str(
            "name: interface\nrequired: [device, interface]\ntypes:\n  vid: integer\n",
        )
        .unwrap()
    }

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.insert(interface_model());
        registry
    }

    #[test]
    fn test_model_validation() {
        let model = interface_model();
        let good = Record::new()
            .with("device", "r1")
            .with("interface", "Gi1")
            .with("vid", 10);
        assert!(model.validate(&good).is_ok());

        let bad = Record::new().with("device", "r1").with("vid", "ten");
        let err = model.validate(&bad).unwrap_err().to_string();
        assert!(err.contains("missing required field 'interface'"));
        assert!(err.contains("field 'vid'"));
    }

    #[test]
    fn test_log_policy_drops_invalid_records() {
        let records = vec![
            Record::new()
                .with("device", "r1")
                .with("interface", "Gi1")
                .with("model", "interface"),
            Record::new().with("device", "r2").with("model", "interface"),
            Record::new().with("device", "r3"),
            Record::new().with("device", "r4").with("model", "unknown"),
        ];

        let valid = registry()
            .validate_records(records, DEFAULT_MODEL_KEY, ValidationPolicy::Log)
            .unwrap();

        let devices: Vec<_> = valid.iter().filter_map(|r| r.get_str("device")).collect();
        assert_eq!(devices, vec!["r1", "r3", "r4"]);
    }

    #[test]
    fn test_raise_policy_aborts() {
        let records = vec![Record::new().with("device", "r2").with("model", "interface")];
        let result = registry().validate_records(records, DEFAULT_MODEL_KEY, ValidationPolicy::Raise);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("interface.yaml"),
            "name: interface\nrequired: [interface]\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("vlan.yml"), "name: vlan\n").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not a model").unwrap();

        let registry = ModelRegistry::load_dir(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("interface").unwrap().required, vec!["interface"]);
        assert!(registry.get("vlan").unwrap().types.is_empty());
    }

    #[test]
    fn test_load_missing_dir() {
        assert!(ModelRegistry::load_dir(Path::new("/nonexistent/models")).is_err());
    }
}
