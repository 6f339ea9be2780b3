//! Default-versus-supplied diff used by the run summary.
//!
//! The summary lists only parameters whose supplied value differs from the
//! schema default. Defaults may reference run-time directories through
//! placeholder tokens; those are resolved against the supplied value before
//! comparing.

use indexmap::IndexMap;
use paramcheck_types::{CORE_OPTIONS_GROUP, ParamSpec, ParamValue, ParameterMap, ParamsSummary, WorkflowIdentity};
use tracing::debug;

use crate::SchemaModel;

/// Parameters never shown in the summary.
pub const SUMMARY_BLACKLIST: &[&str] = &["hostnames"];

const PROJECT_DIR_TOKENS: &[&str] = &["${projectDir}", "$projectDir"];
const OUTDIR_TOKENS: &[&str] = &["${params.outdir}", "$params.outdir"];
const OUTDIR_PARAM: &str = "outdir";

/// Builds the grouped summary: core options first, then one entry per schema
/// group in schema order.
///
/// Groups whose parameters all match their defaults stay in the structure with
/// no entries. Schema groups sharing a title, including one titled like the
/// core options group, are merged into a single entry in first-seen order.
pub fn build_summary(identity: &WorkflowIdentity, params: &ParameterMap, schema: &SchemaModel) -> ParamsSummary {
    let mut groups = IndexMap::new();
    groups.insert(CORE_OPTIONS_GROUP.to_string(), core_options(identity));

    for group in schema.groups() {
        let differing: IndexMap<String, ParamValue> = group
            .parameters
            .iter()
            .filter(|(name, _)| !SUMMARY_BLACKLIST.contains(&name.as_str()))
            .filter_map(|(name, spec)| {
                let supplied = params.get(name)?;
                differs_from_default(supplied, spec, params).then(|| (name.clone(), supplied.clone()))
            })
            .collect();
        debug!(group = %group.title, differing = differing.len(), "Summarised parameter group");
        groups.entry(group.title.clone()).or_default().extend(differing);
    }

    ParamsSummary { groups }
}

fn core_options(identity: &WorkflowIdentity) -> IndexMap<String, ParamValue> {
    let mut core = IndexMap::new();
    if let Some(revision) = &identity.revision {
        core.insert("revision".to_string(), ParamValue::from(revision.as_str()));
    }
    core.insert("runName".to_string(), ParamValue::from(identity.run_name.as_str()));
    if let Some(engine) = &identity.container_engine {
        core.insert("containerEngine".to_string(), ParamValue::from(engine.as_str()));
    }
    if let Some(container) = &identity.container {
        core.insert("container".to_string(), ParamValue::from(container.as_str()));
    }
    core.insert("launchDir".to_string(), ParamValue::from(identity.launch_dir.as_str()));
    core.insert("workDir".to_string(), ParamValue::from(identity.work_dir.as_str()));
    core.insert("projectDir".to_string(), ParamValue::from(identity.project_dir.as_str()));
    core.insert("userName".to_string(), ParamValue::from(identity.user_name.as_str()));
    core.insert("profile".to_string(), ParamValue::from(identity.profile.as_str()));
    core.insert("configFiles".to_string(), ParamValue::String(identity.config_files.join(", ")));
    core
}

fn differs_from_default(supplied: &ParamValue, spec: &ParamSpec, params: &ParameterMap) -> bool {
    match resolve_default(supplied, spec, params) {
        Some(resolved) => !supplied.loosely_equals(&resolved),
        None => !supplied.is_falsy(),
    }
}

/// Resolves the value `supplied` is compared against.
///
/// Returns `None` when the schema declares no default and the type has no
/// zero value.
pub fn resolve_default(supplied: &ParamValue, spec: &ParamSpec, params: &ParameterMap) -> Option<ParamValue> {
    let Some(default) = &spec.default else {
        return spec.r#type.zero_value();
    };
    let ParamValue::String(template) = default else {
        return Some(default.clone());
    };

    if let Some(suffix) = strip_token(template, PROJECT_DIR_TOKENS) {
        let supplied_text = supplied.to_string();
        if supplied_text.contains(&suffix) {
            return Some(supplied.clone());
        }
    }
    if let Some(suffix) = strip_token(template, OUTDIR_TOKENS) {
        let outdir = params.get(OUTDIR_PARAM).map(ToString::to_string).unwrap_or_default();
        if format!("{}{}", outdir, suffix) == supplied.to_string() {
            return Some(supplied.clone());
        }
    }

    match supplied {
        ParamValue::Duration(_) | ParamValue::Size(_) => Some(ParamValue::parse_literal(template)),
        _ => Some(default.clone()),
    }
}

/// Removes the first matching token from `template`, returning the remainder.
fn strip_token(template: &str, tokens: &[&str]) -> Option<String> {
    tokens
        .iter()
        .find(|token| template.contains(*token))
        .map(|token| template.replacen(token, "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramcheck_types::ByteSize;
    use serde_json::json;
    use std::time::Duration;

    fn schema() -> SchemaModel {
        SchemaModel::from_document(json!({
            "definitions": {
                "input_options": {
                    "title": "Input options",
                    "properties": {
                        "outdir": { "type": "string", "default": "./results" },
                        "save_tmp": { "type": "boolean", "default": false },
                        "tracedir": { "type": "string", "default": "${params.outdir}/pipeline_info" },
                        "adapters": { "type": "string", "default": "${projectDir}/assets/adapters.fa" }
                    }
                },
                "compute_options": {
                    "title": "Compute options",
                    "properties": {
                        "max_cpus": { "type": "integer", "default": 16 },
                        "max_memory": { "type": "string", "default": "128.GB" },
                        "max_time": { "type": "string", "default": "240.h" },
                        "min_ratio": { "type": "number" },
                        "email": { "type": "string" },
                        "hostnames": { "type": "object" }
                    }
                }
            }
        }))
        .expect("valid schema")
    }

    fn params(entries: &[(&str, ParamValue)]) -> ParameterMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn only_values_differing_from_defaults_are_kept() {
        let summary = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("outdir", "./results".into()), ("save_tmp", ParamValue::Bool(true))]),
            &schema(),
        );

        let input = &summary.groups["Input options"];
        assert_eq!(input.len(), 1);
        assert_eq!(input["save_tmp"], ParamValue::Bool(true));
        assert!(summary.groups["Compute options"].is_empty());
    }

    #[test]
    fn project_dir_placeholder_matches_by_suffix() {
        let summary = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("adapters", "/home/user/project/assets/adapters.fa".into())]),
            &schema(),
        );
        assert!(summary.get("adapters").is_none());

        let moved = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("adapters", "/data/custom.fa".into())]),
            &schema(),
        );
        assert_eq!(moved.get("adapters"), Some(&ParamValue::from("/data/custom.fa")));
    }

    #[test]
    fn outdir_placeholder_requires_exact_concatenation() {
        let unchanged = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("outdir", "s3://bucket/out".into()), ("tracedir", "s3://bucket/out/pipeline_info".into())]),
            &schema(),
        );
        assert!(unchanged.get("tracedir").is_none());
        assert_eq!(unchanged.get("outdir"), Some(&ParamValue::from("s3://bucket/out")));

        let changed = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("outdir", "s3://bucket/out".into()), ("tracedir", "/tmp/trace/pipeline_info".into())]),
            &schema(),
        );
        assert!(changed.get("tracedir").is_some());
    }

    #[test]
    fn numeric_and_quantity_defaults_compare_by_value() {
        let summary = build_summary(
            &WorkflowIdentity::default(),
            &params(&[
                ("max_cpus", ParamValue::Float(16.0)),
                ("max_memory", ParamValue::Size(ByteSize(128 * 1024 * 1024 * 1024))),
                ("max_time", ParamValue::Duration(Duration::from_secs(240 * 3_600))),
            ]),
            &schema(),
        );
        assert!(summary.groups["Compute options"].is_empty());
    }

    #[test]
    fn missing_defaults_fall_back_to_type_zero_values() {
        let summary = build_summary(
            &WorkflowIdentity::default(),
            &params(&[
                ("email", "".into()),
                ("min_ratio", ParamValue::Float(0.0)),
                ("hostnames", ParamValue::Map(IndexMap::from([("a".to_string(), "b".into())]))),
            ]),
            &schema(),
        );
        assert!(summary.groups["Compute options"].is_empty());

        let set = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("email", "me@example.com".into()), ("min_ratio", ParamValue::Float(0.5))]),
            &schema(),
        );
        assert_eq!(set.groups["Compute options"].len(), 2);
    }

    #[test]
    fn groups_sharing_a_title_are_merged() {
        let schema = SchemaModel::from_document(json!({
            "definitions": {
                "a": { "title": "Options", "properties": { "alpha": { "type": "integer", "default": 1 } } },
                "b": { "title": "Options", "properties": { "beta": { "type": "integer", "default": 1 } } }
            }
        }))
        .expect("valid schema");

        let summary = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("alpha", ParamValue::Integer(5)), ("beta", ParamValue::Integer(1))]),
            &schema,
        );
        assert_eq!(summary.get("alpha"), Some(&ParamValue::Integer(5)));
        assert!(summary.get("beta").is_none());
        let titles: Vec<&str> = summary.groups.keys().map(String::as_str).collect();
        assert_eq!(titles, vec![CORE_OPTIONS_GROUP, "Options"]);

        let both_changed = build_summary(
            &WorkflowIdentity::default(),
            &params(&[("alpha", ParamValue::Integer(5)), ("beta", ParamValue::Integer(2))]),
            &schema,
        );
        let keys: Vec<&str> = both_changed.groups["Options"].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
    }

    #[test]
    fn schema_group_named_like_core_options_keeps_run_identity() {
        let schema = SchemaModel::from_document(json!({
            "definitions": {
                "core": {
                    "title": "Core options",
                    "properties": { "outdir": { "type": "string", "default": "./results" } }
                }
            }
        }))
        .expect("valid schema");
        let identity = WorkflowIdentity {
            run_name: "tiny_turing".into(),
            ..WorkflowIdentity::default()
        };

        let summary = build_summary(&identity, &params(&[("outdir", "/data/out".into())]), &schema);
        assert_eq!(summary.groups.len(), 1);
        let core = &summary.groups[CORE_OPTIONS_GROUP];
        assert_eq!(core["runName"], ParamValue::from("tiny_turing"));
        assert_eq!(core["outdir"], ParamValue::from("/data/out"));
        assert_eq!(core.keys().last().map(String::as_str), Some("outdir"));
    }

    #[test]
    fn core_options_come_first_with_optional_fields() {
        let identity = WorkflowIdentity {
            manifest_name: "nf-core/rnaseq".into(),
            run_name: "tiny_turing".into(),
            container_engine: Some("docker".into()),
            config_files: vec!["a.config".into(), "b.config".into()],
            ..WorkflowIdentity::default()
        };
        let summary = build_summary(&identity, &ParameterMap::new(), &schema());

        let (first, core) = summary.groups.first().expect("core group");
        assert_eq!(first, CORE_OPTIONS_GROUP);
        let keys: Vec<&str> = core.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "runName",
                "containerEngine",
                "launchDir",
                "workDir",
                "projectDir",
                "userName",
                "profile",
                "configFiles"
            ]
        );
        assert_eq!(core["configFiles"], ParamValue::from("a.config, b.config"));
    }
}
