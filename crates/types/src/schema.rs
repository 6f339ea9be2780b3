//! Grouped parameter schema definitions.
//!
//! A pipeline schema declares its parameters inside named groups. The models
//! here keep authoring order (via `IndexMap`) because help and summary output
//! follow the order in which the schema author wrote the groups and
//! parameters.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ParamValue;

/// Declared JSON type of a parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Boolean,
    Integer,
    Number,
    Object,
    Array,
    Null,
    /// Any type keyword this model does not know about.
    #[serde(other)]
    Other,
}

impl ParamType {
    /// Type-appropriate "unset" value used when the schema declares no default.
    ///
    /// Only booleans, strings and integers have a zero value; everything else
    /// returns `None`.
    pub fn zero_value(&self) -> Option<ParamValue> {
        match self {
            ParamType::Boolean => Some(ParamValue::Bool(false)),
            ParamType::String => Some(ParamValue::String(String::new())),
            ParamType::Integer => Some(ParamValue::Integer(0)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Object => "object",
            ParamType::Array => "array",
            ParamType::Null => "null",
            ParamType::Other => "value",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The schema's declared contract for one parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ParamSpec {
    /// Declared primitive type; defaults to `string` when omitted.
    #[serde(default)]
    pub r#type: ParamType,
    /// One-line description shown in help output.
    #[serde(default)]
    pub description: String,
    /// Longer help text shown when help for a single parameter is requested.
    #[serde(default)]
    pub help_text: Option<String>,
    /// Declared default, possibly containing a directory placeholder.
    #[serde(default)]
    pub default: Option<ParamValue>,
    /// Hidden parameters are omitted from help unless explicitly requested.
    #[serde(default)]
    pub hidden: bool,
    /// Enumerated literals accepted for this parameter.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<ParamValue>,
}

/// A named section of the schema grouping related parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SchemaGroup {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Parameters keyed by name, in authoring order.
    #[serde(rename = "properties")]
    pub parameters: IndexMap<String, ParamSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_spec_deserializes_nf_style_property() {
        let spec: ParamSpec = serde_json::from_value(json!({
            "type": "string",
            "description": "Path to the output directory.",
            "default": "./results",
            "fa_icon": "fas fa-folder-open",
            "enum": ["a", "b"]
        }))
        .expect("valid property");

        assert_eq!(spec.r#type, ParamType::String);
        assert_eq!(spec.default, Some(ParamValue::String("./results".into())));
        assert_eq!(spec.enum_values.len(), 2);
        assert!(!spec.hidden);
    }

    #[test]
    fn unknown_and_missing_types_are_tolerated() {
        let spec: ParamSpec = serde_json::from_value(json!({"type": "date"})).expect("valid property");
        assert_eq!(spec.r#type, ParamType::Other);

        let spec: ParamSpec = serde_json::from_value(json!({"description": "no type"})).expect("valid property");
        assert_eq!(spec.r#type, ParamType::String);
    }

    #[test]
    fn zero_values_follow_declared_type() {
        assert_eq!(ParamType::Boolean.zero_value(), Some(ParamValue::Bool(false)));
        assert_eq!(ParamType::Integer.zero_value(), Some(ParamValue::Integer(0)));
        assert_eq!(ParamType::Number.zero_value(), None);
    }
}
