//! Grouped parameter schema loading and flattening.
//!
//! The schema document keeps its parameters under a top-level `definitions`
//! object (or `$defs` for newer drafts). Each entry is one group with a
//! `title`, a `description` and a `properties` object. [`SchemaModel`] parses
//! that shape into ordered [`SchemaGroup`]s, flattens the expected parameter
//! names once, and keeps the raw document for the validation engine.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use paramcheck_types::{ParamSpec, SchemaGroup};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

const DEFINITION_KEYS: [&str; 2] = ["definitions", "$defs"];

/// Errors raised while loading or compiling a parameter schema.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("schema has no top-level 'definitions' object")]
    MissingDefinitions,

    #[error("schema group '{group}' has no 'properties' object")]
    MissingProperties { group: String },

    #[error("schema property '{name}' is malformed: {source}")]
    InvalidProperty {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("parameter '{name}' is declared in both '{first_group}' and '{second_group}'")]
    DuplicateParameter {
        name: String,
        first_group: String,
        second_group: String,
    },

    #[error("schema could not be compiled: {message}")]
    InvalidSchema { message: String },
}

/// Parsed schema: ordered groups plus the flattened set of parameter names.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    groups: Vec<SchemaGroup>,
    expected_names: IndexSet<String>,
    document: Value,
}

impl SchemaModel {
    /// Loads a schema file. Files ending in `.yaml`/`.yml` are parsed as YAML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = if is_yaml_path(path) {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        let model = Self::from_document(document)?;
        debug!(
            path = %path.display(),
            groups = model.groups.len(),
            parameters = model.expected_names.len(),
            "Loaded parameter schema"
        );
        Ok(model)
    }

    /// Loads a schema for help and summary output, degrading to an empty model
    /// when the file cannot be used.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(model) => model,
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Could not read parameters settings from schema; continuing without groups"
                );
                Self::default()
            }
        }
    }

    /// Builds a model from an already parsed schema document.
    pub fn from_document(document: Value) -> Result<Self, SchemaLoadError> {
        let definitions = definitions_of(&document).ok_or(SchemaLoadError::MissingDefinitions)?;

        let mut groups = Vec::with_capacity(definitions.len());
        let mut expected_names = IndexSet::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for (key, group_document) in definitions {
            let properties = group_document
                .get("properties")
                .and_then(Value::as_object)
                .ok_or_else(|| SchemaLoadError::MissingProperties { group: key.clone() })?;
            let title = group_document
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(key)
                .to_string();
            let description = group_document
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let mut parameters = IndexMap::with_capacity(properties.len());
            for (name, property) in properties {
                let spec: ParamSpec =
                    serde_json::from_value(property.clone()).map_err(|source| SchemaLoadError::InvalidProperty {
                        name: name.clone(),
                        source,
                    })?;
                if let Some(first_group) = owners.get(name) {
                    return Err(SchemaLoadError::DuplicateParameter {
                        name: name.clone(),
                        first_group: first_group.clone(),
                        second_group: title.clone(),
                    });
                }
                owners.insert(name.clone(), title.clone());
                expected_names.insert(name.clone());
                parameters.insert(name.clone(), spec);
            }

            groups.push(SchemaGroup {
                title,
                description,
                parameters,
            });
        }

        Ok(Self {
            groups,
            expected_names,
            document,
        })
    }

    pub fn groups(&self) -> &[SchemaGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Union of parameter names across all groups, in schema order.
    pub fn flatten_expected_names(&self) -> &IndexSet<String> {
        &self.expected_names
    }

    /// The raw schema document as loaded.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Finds a parameter and the title of the group that declares it.
    pub fn find(&self, name: &str) -> Option<(&str, &ParamSpec)> {
        self.groups
            .iter()
            .find_map(|group| group.parameters.get(name).map(|spec| (group.title.as_str(), spec)))
    }

    /// Enumerated choices per parameter, rendered as display strings.
    pub fn enum_choices(&self) -> IndexMap<String, Vec<String>> {
        self.groups
            .iter()
            .flat_map(|group| group.parameters.iter())
            .filter(|(_, spec)| !spec.enum_values.is_empty())
            .map(|(name, spec)| {
                let choices = spec.enum_values.iter().map(ToString::to_string).collect();
                (name.clone(), choices)
            })
            .collect()
    }

    /// Widest parameter name across the whole schema, in terminal columns.
    pub fn max_name_width(&self, include_hidden: bool) -> usize {
        self.groups
            .iter()
            .flat_map(|group| group.parameters.iter())
            .filter(|(_, spec)| include_hidden || !spec.hidden)
            .map(|(name, _)| name.width())
            .max()
            .unwrap_or(0)
    }

    /// Copy of the schema document with `ignored` parameters removed from every
    /// `properties` object and `required` list, so they are never validated.
    pub fn without_ignored(&self, ignored: &[String]) -> Value {
        let mut document = self.document.clone();
        if ignored.is_empty() {
            return document;
        }

        strip_parameters(&mut document, ignored);
        for key in DEFINITION_KEYS {
            if let Some(definitions) = document.get_mut(key).and_then(Value::as_object_mut) {
                for group in definitions.values_mut() {
                    strip_parameters(group, ignored);
                }
            }
        }
        document
    }
}

fn definitions_of(document: &Value) -> Option<&Map<String, Value>> {
    DEFINITION_KEYS
        .iter()
        .find_map(|key| document.get(*key).and_then(Value::as_object))
}

fn strip_parameters(node: &mut Value, ignored: &[String]) {
    if let Some(properties) = node.get_mut("properties").and_then(Value::as_object_mut) {
        for name in ignored {
            properties.shift_remove(name);
        }
    }
    if let Some(required) = node.get_mut("required").and_then(Value::as_array_mut) {
        required.retain(|entry| entry.as_str().is_none_or(|name| !ignored.iter().any(|ignored| ignored == name)));
    }
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"))
}
