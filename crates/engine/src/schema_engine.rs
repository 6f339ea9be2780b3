//! Seam between the validator and the JSON-schema validation capability.
//!
//! The validator only needs "valid" or "a tree of violations". Each
//! [`ViolationNode`] carries a message, a JSON-pointer-style path (`#` for the
//! document root, `#/outdir` for a parameter) and the violations that caused it.

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::SchemaLoadError;

/// One node of a violation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationNode {
    pub message: String,
    /// Pointer to the offending location, rooted at `#`.
    pub pointer: String,
    /// Violations that caused this one, for composite rules.
    pub children: Vec<ViolationNode>,
}

impl ViolationNode {
    pub fn leaf(message: impl Into<String>, pointer: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pointer: pointer.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(message: impl Into<String>, pointer: impl Into<String>, children: Vec<ViolationNode>) -> Self {
        Self {
            message: message.into(),
            pointer: pointer.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Validates a candidate document against a schema document.
pub trait SchemaEngine {
    /// Returns `Ok(None)` when `document` satisfies `schema`, `Ok(Some(root))`
    /// with the violation tree otherwise. A schema that cannot be compiled is an
    /// error.
    fn validate(&self, schema: &Value, document: &Value) -> Result<Option<ViolationNode>, SchemaLoadError>;
}

/// [`SchemaEngine`] backed by the `jsonschema` crate.
///
/// All errors are collected. A single error is returned as a leaf; several are
/// grouped under a root node, one child per error. Missing required properties
/// are reported as `required key [NAME] not found`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine;

impl SchemaEngine for JsonSchemaEngine {
    fn validate(&self, schema: &Value, document: &Value) -> Result<Option<ViolationNode>, SchemaLoadError> {
        let validator = jsonschema::validator_for(schema).map_err(|error| SchemaLoadError::InvalidSchema {
            message: error.to_string(),
        })?;

        let mut violations: Vec<ViolationNode> = validator
            .iter_errors(document)
            .map(|error| {
                let pointer = format!("#{}", error.instance_path);
                let message = match &error.kind {
                    ValidationErrorKind::Required { property } => {
                        let name = property.as_str().map_or_else(|| property.to_string(), str::to_string);
                        format!("required key [{}] not found", name)
                    }
                    _ => error.to_string(),
                };
                ViolationNode::leaf(message, pointer)
            })
            .collect();

        Ok(match violations.len() {
            0 => None,
            1 => violations.pop(),
            count => Some(ViolationNode::branch(
                format!("#: {} schema violations found", count),
                "#",
                violations,
            )),
        })
    }
}
