//! Normalises a raw parameter map into the document handed to schema validation.

use paramcheck_types::{ParamValue, ParameterMap, format_duration};
use serde_json::{Map, Value};

/// Drops unset entries and stringifies quantities and nested maps.
///
/// - Falsy values (null, `""`, `false`, zero, empty collections, zero
///   quantities) are removed so the schema only sees explicitly set values.
/// - Durations become `"2day 3h"`-style strings, sizes `"8 GB"`-style strings,
///   nested maps compact JSON strings. List items are converted the same way
///   but are never dropped, so `[0, "2d"]` keeps both entries.
///
/// The input map is left untouched; callers keep it for echoing values in
/// diagnostics. Cleaning is idempotent.
pub fn clean(params: &ParameterMap) -> ParameterMap {
    params
        .iter()
        .filter(|(_, value)| !value.is_falsy())
        .map(|(name, value)| (name.clone(), clean_value(value)))
        .collect()
}

fn clean_value(value: &ParamValue) -> ParamValue {
    match value {
        ParamValue::Duration(duration) => ParamValue::String(spell_out_days(&format_duration(*duration))),
        ParamValue::Size(size) => ParamValue::String(size.to_string()),
        ParamValue::Map(_) => ParamValue::String(value.to_string()),
        ParamValue::List(items) => ParamValue::List(items.iter().map(clean_value).collect()),
        ParamValue::Null | ParamValue::Bool(_) | ParamValue::Integer(_) | ParamValue::Float(_) | ParamValue::String(_) => {
            value.clone()
        }
    }
}

/// Rewrites the first bare day component (`2d`) as `2day`.
fn spell_out_days(rendered: &str) -> String {
    let mut replaced = false;
    rendered
        .split(' ')
        .map(|component| {
            let is_days = component
                .strip_suffix('d')
                .is_some_and(|count| !count.is_empty() && count.chars().all(|c| c.is_ascii_digit()));
            if is_days && !replaced {
                replaced = true;
                format!("{}day", &component[..component.len() - 1])
            } else {
                component.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Converts a cleaned map into the JSON object consumed by schema validation.
pub fn to_document(cleaned: &ParameterMap) -> Value {
    let object: Map<String, Value> = cleaned
        .iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect();
    Value::Object(object)
}
