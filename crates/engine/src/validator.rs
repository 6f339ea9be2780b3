//! Parameter validation against a grouped schema.
//!
//! Validation runs three independent checks over one parameter snapshot:
//!
//! 1. unexpected parameters (warnings) computed from the raw map;
//! 2. reserved runtime options passed as parameters (errors);
//! 3. schema validation of the cleaned map, with the violation tree flattened
//!    into one [`Diagnostic`] per leaf.
//!
//! Every diagnostic is collected before the outcome is returned; nothing aborts
//! on the first failure.

use once_cell::sync::Lazy;
use paramcheck_types::{Diagnostic, ParameterMap, ValidationOutcome};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::schema_engine::{SchemaEngine, ViolationNode};
use crate::{SchemaLoadError, SchemaModel, cleaner, reserved, unexpected};

/// Maximum number of enum choices listed in an invalid-choice diagnostic.
pub const CHOICE_DISPLAY_LIMIT: usize = 5;

static REQUIRED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"required key \[([^\]]+)\] not found").expect("required key regex should compile"));

/// Raised by [`ensure_valid`] when a validation outcome carries errors.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("validation of pipeline parameters failed with {} error(s)", .diagnostics.len())]
pub struct ValidationError {
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts an outcome into an error when it has fatal diagnostics.
pub fn ensure_valid(outcome: ValidationOutcome) -> Result<ValidationOutcome, ValidationError> {
    if outcome.has_error {
        return Err(ValidationError {
            diagnostics: outcome.diagnostics,
        });
    }
    Ok(outcome)
}

/// Validates parameter snapshots against one schema.
pub struct ParameterValidator<'a> {
    schema: &'a SchemaModel,
    engine: &'a dyn SchemaEngine,
    extra_ignored: Vec<String>,
}

impl<'a> ParameterValidator<'a> {
    pub fn new(schema: &'a SchemaModel, engine: &'a dyn SchemaEngine) -> Self {
        Self {
            schema,
            engine,
            extra_ignored: Vec::new(),
        }
    }

    /// Adds names excluded from both the unexpected check and schema validation.
    pub fn with_ignored(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.extra_ignored.extend(names);
        self
    }

    /// Runs every check over `params` and collects the results.
    ///
    /// Fails only when the schema itself cannot be compiled by the engine.
    pub fn validate(&self, params: &ParameterMap) -> Result<ValidationOutcome, SchemaLoadError> {
        let expected = self.schema.flatten_expected_names();
        let ignored = unexpected::ignore_list(params, &self.extra_ignored);

        let unexpected_params = unexpected::drop_case_aliases(
            unexpected::detect(params.keys().map(String::as_str), expected, &ignored),
            expected,
        );

        let mut diagnostics: Vec<Diagnostic> = params
            .keys()
            .filter(|name| reserved::contains(name))
            .map(Diagnostic::reserved_option)
            .collect();
        let reserved_collision = !diagnostics.is_empty();

        let cleaned = cleaner::clean(params);
        let document = cleaner::to_document(&cleaned);
        let schema_document = self.schema.without_ignored(&ignored);
        let violations = self.engine.validate(&schema_document, &document)?;

        let schema_failed = violations.is_some();
        if let Some(root) = violations {
            let context = WalkContext {
                schema: self.schema,
                params,
                cleaned: &cleaned,
            };
            collect_leaf_diagnostics(&root, &context, &mut diagnostics);
        }

        debug!(
            diagnostics = diagnostics.len(),
            unexpected = unexpected_params.len(),
            "Validated pipeline parameters"
        );

        Ok(ValidationOutcome {
            diagnostics,
            unexpected_params,
            has_error: schema_failed || reserved_collision,
        })
    }
}

struct WalkContext<'a> {
    schema: &'a SchemaModel,
    params: &'a ParameterMap,
    cleaned: &'a ParameterMap,
}

/// Depth-first walk emitting one diagnostic per leaf, in traversal order.
fn collect_leaf_diagnostics(node: &ViolationNode, context: &WalkContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
    if node.is_leaf() {
        diagnostics.push(classify_leaf(node, context));
        return;
    }
    for child in &node.children {
        collect_leaf_diagnostics(child, context, diagnostics);
    }
}

fn classify_leaf(node: &ViolationNode, context: &WalkContext<'_>) -> Diagnostic {
    if let Some(captures) = REQUIRED_KEY.captures(&node.message) {
        return Diagnostic::missing_required(&captures[1]);
    }

    let path = node.pointer.trim_start_matches('#').trim_start_matches('/');
    if path.is_empty() {
        return Diagnostic::schema_structure(node.message.clone());
    }

    let parameter = unescape_pointer_segment(path.split('/').next().unwrap_or(path));
    let raw_value = context
        .params
        .get(&parameter)
        .or_else(|| context.cleaned.get(&parameter))
        .map(ToString::to_string);

    match context.schema.find(&parameter) {
        Some((_, spec)) if !spec.enum_values.is_empty() && path == parameter => {
            let choices: Vec<String> = spec.enum_values.iter().map(ToString::to_string).collect();
            Diagnostic::invalid_choice(path, raw_value, &choices, CHOICE_DISPLAY_LIMIT)
        }
        _ => Diagnostic::invalid_value(path, node.message.clone(), raw_value),
    }
}

fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
