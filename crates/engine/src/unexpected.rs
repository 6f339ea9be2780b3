//! Detection of supplied parameters that the schema does not declare.

use std::collections::HashSet;

use indexmap::IndexSet;
use paramcheck_types::{ParamValue, ParameterMap};

/// Parameter holding the comma-separated ignore list. Always ignored itself.
pub const IGNORE_PARAMS_KEY: &str = "schema_ignore_params";

/// Supplied keys that are neither expected nor ignored, in supplied order.
///
/// # Example
/// ```rust
/// use indexmap::IndexSet;
/// use paramcheck_engine::unexpected::detect;
///
/// let expected: IndexSet<String> = ["alpha".to_string(), "beta".to_string()].into_iter().collect();
/// let unexpected = detect(["alpha", "gamma", "delta"], &expected, &["gamma".to_string()]);
/// assert_eq!(unexpected, vec!["delta".to_string()]);
/// ```
pub fn detect<'a, I>(supplied_keys: I, expected_names: &IndexSet<String>, ignore_list: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    supplied_keys
        .into_iter()
        .filter(|key| !expected_names.contains(*key))
        .filter(|key| !ignore_list.iter().any(|ignored| ignored == key))
        .map(str::to_string)
        .collect()
}

/// Reads the ignore list from the supplied parameters.
///
/// The list always contains [`IGNORE_PARAMS_KEY`] itself, followed by the
/// comma-separated names from its value and then `extra` names.
pub fn ignore_list(params: &ParameterMap, extra: &[String]) -> Vec<String> {
    let mut names = vec![IGNORE_PARAMS_KEY.to_string()];
    if let Some(value) = params.get(IGNORE_PARAMS_KEY) {
        let raw = match value {
            ParamValue::List(items) => items.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            other => other.to_string(),
        };
        names.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }
    names.extend(extra.iter().cloned());
    names
}

/// Removes launcher-generated aliases from an unexpected-parameter list.
///
/// Launchers register `--max-memory` under both `max-memory` and `maxMemory`.
/// A hyphenated key whose case- and hyphen-insensitive form matches an
/// expected parameter is dropped, and keys that collapse to the same form are
/// reported once (first occurrence wins).
pub fn drop_case_aliases(unexpected: Vec<String>, expected_names: &IndexSet<String>) -> Vec<String> {
    let expected_folded: HashSet<String> = expected_names.iter().map(|name| fold_name(name)).collect();
    let mut seen = HashSet::new();
    unexpected
        .into_iter()
        .filter(|name| {
            let folded = fold_name(name);
            if name.contains('-') && expected_folded.contains(&folded) {
                return false;
            }
            seen.insert(folded)
        })
        .collect()
}

fn fold_name(name: &str) -> String {
    name.replace('-', "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn expected(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn ignored_keys_are_not_unexpected() {
        let params: ParameterMap = IndexMap::from([
            ("alpha".to_string(), ParamValue::Integer(1)),
            ("gamma".to_string(), ParamValue::Integer(2)),
            (IGNORE_PARAMS_KEY.to_string(), ParamValue::String("gamma".into())),
        ]);
        let ignore = ignore_list(&params, &[]);
        let unexpected = detect(params.keys().map(String::as_str), &expected(&["alpha", "beta"]), &ignore);
        assert!(unexpected.is_empty());
    }

    #[test]
    fn output_follows_supplied_order() {
        let unexpected = detect(["zeta", "alpha", "mu"], &expected(&["alpha"]), &[]);
        assert_eq!(unexpected, vec!["zeta".to_string(), "mu".to_string()]);
    }

    #[test]
    fn ignore_list_is_trimmed_and_extended() {
        let params: ParameterMap = IndexMap::from([(
            IGNORE_PARAMS_KEY.to_string(),
            ParamValue::String(" genomes, igenomes_base ,,".into()),
        )]);
        let names = ignore_list(&params, &["extra".to_string()]);
        assert_eq!(names, vec![IGNORE_PARAMS_KEY, "genomes", "igenomes_base", "extra"]);
    }

    #[test]
    fn hyphenated_aliases_of_expected_names_are_dropped() {
        let unexpected = vec![
            "max-memory".to_string(),
            "foo-bar".to_string(),
            "fooBar".to_string(),
            "other".to_string(),
        ];
        let kept = drop_case_aliases(unexpected, &expected(&["maxMemory"]));
        assert_eq!(kept, vec!["foo-bar".to_string(), "other".to_string()]);
    }
}
