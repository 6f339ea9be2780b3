//! Error and warning text for a validation outcome.

use paramcheck_engine::IGNORE_PARAMS_KEY;
use paramcheck_types::{Diagnostic, DiagnosticKind, ParameterMap, RenderOptions, ValidationOutcome};
use paramcheck_util::LogColours;

/// One line per diagnostic under a failure banner. Empty when the outcome has
/// no diagnostics.
pub fn render_errors(outcome: &ValidationOutcome, options: RenderOptions) -> String {
    if outcome.diagnostics.is_empty() {
        return String::new();
    }
    let colours = LogColours::new(options);
    let mut output = format!(
        "{}ERROR: Validation of pipeline parameters failed!{}\n",
        colours.red, colours.reset
    );
    for diagnostic in &outcome.diagnostics {
        output.push_str(&format!("* {}\n", diagnostic_line(diagnostic)));
    }
    output
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    match (diagnostic.kind, diagnostic.parameter_name.as_deref()) {
        (DiagnosticKind::MissingRequired, Some(name)) => format!("Missing required parameter: --{}", name),
        (DiagnosticKind::InvalidValue, Some(name)) => match &diagnostic.raw_value {
            Some(value) => format!("--{}: {} ({})", name, diagnostic.message, value),
            None => format!("--{}: {}", name, diagnostic.message),
        },
        (DiagnosticKind::InvalidChoice, Some(name)) => format!("--{}: {}", name, diagnostic.message),
        _ => diagnostic.message.clone(),
    }
}

/// Lists unexpected parameters with their supplied values, plus a hint for
/// silencing them. Empty when nothing is left to warn about.
///
/// With `dedupe_reserved`, keys already reported as reserved-option
/// collisions are not repeated here.
pub fn render_warnings(
    outcome: &ValidationOutcome,
    params: &ParameterMap,
    dedupe_reserved: bool,
    options: RenderOptions,
) -> String {
    let reserved: Vec<&str> = if dedupe_reserved {
        outcome.reserved_collisions().collect()
    } else {
        Vec::new()
    };
    let names: Vec<&str> = outcome
        .unexpected_params
        .iter()
        .map(String::as_str)
        .filter(|name| !reserved.contains(name))
        .collect();
    if names.is_empty() {
        return String::new();
    }

    let colours = LogColours::new(options);
    let mut output = format!("{}Found unexpected parameters:{}\n", colours.yellow, colours.reset);
    for name in &names {
        let value = params.get(*name).map(ToString::to_string).unwrap_or_default();
        output.push_str(&format!("* --{}: {}\n", name, value));
    }
    output.push_str(&format!(
        "{}! Ignore this warning: --{} '{}'{}\n",
        colours.dim,
        IGNORE_PARAMS_KEY,
        names.join(","),
        colours.reset
    ));
    output
}
