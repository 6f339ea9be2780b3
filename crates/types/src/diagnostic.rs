//! Validation diagnostics and the aggregated outcome of a validation pass.

use serde::{Deserialize, Serialize};

/// Classifies a diagnostic so renderers can choose the right wording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A parameter marked as required by the schema was not supplied.
    MissingRequired,
    /// A violation at the document root that is not tied to one parameter.
    SchemaStructure,
    /// A supplied value violates the parameter's schema rules.
    InvalidValue,
    /// A supplied value is not one of the parameter's enumerated choices.
    InvalidChoice,
    /// A runtime option was passed with a pipeline-parameter prefix.
    ReservedOption,
}

/// One actionable, leaf-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Offending parameter, absent for document-level violations.
    pub parameter_name: Option<String>,
    pub message: String,
    /// The supplied value echoed back for context.
    pub raw_value: Option<String>,
}

impl Diagnostic {
    pub fn missing_required(name: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MissingRequired,
            parameter_name: Some(name.into()),
            message: "missing required parameter".to_string(),
            raw_value: None,
        }
    }

    pub fn schema_structure(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::SchemaStructure,
            parameter_name: None,
            message: message.into(),
            raw_value: None,
        }
    }

    pub fn invalid_value(name: impl Into<String>, message: impl Into<String>, raw_value: Option<String>) -> Self {
        Self {
            kind: DiagnosticKind::InvalidValue,
            parameter_name: Some(name.into()),
            message: message.into(),
            raw_value,
        }
    }

    /// Builds an enum-choice diagnostic listing at most `limit` of the choices.
    pub fn invalid_choice(name: impl Into<String>, raw_value: Option<String>, choices: &[String], limit: usize) -> Self {
        let value = raw_value.clone().unwrap_or_default();
        let message = if choices.len() > limit {
            format!(
                "'{}' is not a valid choice (Available choices ({} of {}): {}, ... )",
                value,
                limit,
                choices.len(),
                choices[..limit].join(", ")
            )
        } else {
            format!("'{}' is not a valid choice (Available choices: {})", value, choices.join(", "))
        };
        Self {
            kind: DiagnosticKind::InvalidChoice,
            parameter_name: Some(name.into()),
            message,
            raw_value,
        }
    }

    /// Builds the diagnostic for a runtime option passed as `--name`.
    pub fn reserved_option(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: DiagnosticKind::ReservedOption,
            message: format!(
                "You used a core runtime option with two hyphens: '--{name}'. Please resubmit with '-{name}'"
            ),
            parameter_name: Some(name),
            raw_value: None,
        }
    }
}

/// Aggregated result of validating one parameter snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Errors in traversal order; reserved-option collisions come first.
    pub diagnostics: Vec<Diagnostic>,
    /// Supplied parameters unknown to the schema. Warnings only.
    pub unexpected_params: Vec<String>,
    pub has_error: bool,
}

impl ValidationOutcome {
    /// Names of parameters reported as reserved-option collisions.
    pub fn reserved_collisions(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == DiagnosticKind::ReservedOption)
            .filter_map(|diagnostic| diagnostic.parameter_name.as_deref())
    }

    pub fn has_warnings(&self) -> bool {
        !self.unexpected_params.is_empty()
    }
}
