use std::fs;

use paramcheck_engine::{JsonSchemaEngine, ParameterValidator, SchemaModel, build_summary};
use paramcheck_report::{parse_fragment, render_errors, render_summary_fragment, render_summary_text, render_warnings};
use paramcheck_types::{DiagnosticKind, ParamValue, ParameterMap, RenderOptions, WorkflowIdentity};

const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema",
  "title": "nf-core/demo pipeline parameters",
  "type": "object",
  "definitions": {
    "input_options": {
      "title": "Input options",
      "type": "object",
      "properties": {
        "outdir": { "type": "string", "default": "./results" },
        "save_tmp": { "type": "boolean", "default": false },
        "adapters": { "type": "string", "default": "${projectDir}/assets/adapters.fa" }
      }
    },
    "other_options": {
      "title": "Other options",
      "type": "object",
      "properties": {
        "alpha": { "type": "integer" },
        "beta": { "type": "string" }
      }
    }
  },
  "allOf": [
    { "$ref": "#/definitions/input_options" },
    { "$ref": "#/definitions/other_options" }
  ]
}"##;

fn load_schema() -> SchemaModel {
    let directory = tempfile::tempdir().expect("tempdir");
    let path = directory.path().join("nextflow_schema.json");
    fs::write(&path, SCHEMA).expect("write schema");
    SchemaModel::load(&path).expect("schema loads")
}

fn params(entries: &[(&str, ParamValue)]) -> ParameterMap {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn identity() -> WorkflowIdentity {
    WorkflowIdentity {
        manifest_name: "nf-core/demo".into(),
        run_name: "tiny_turing".into(),
        project_dir: "/home/user/project".into(),
        ..WorkflowIdentity::default()
    }
}

#[test]
fn summary_lists_only_changed_parameters() {
    let schema = load_schema();
    let supplied = params(&[("outdir", "./results".into()), ("save_tmp", ParamValue::Bool(true))]);

    let summary = build_summary(&identity(), &supplied, &schema);
    let text = render_summary_text(&summary, RenderOptions::monochrome());

    assert!(text.contains("Input options\n"));
    assert!(text.contains("save_tmp"));
    assert!(!text.contains("outdir"));
    assert!(!text.contains("Other options"));
}

#[test]
fn project_dir_defaults_are_treated_as_unchanged() {
    let schema = load_schema();
    let supplied = params(&[("adapters", "/home/user/project/assets/adapters.fa".into())]);

    let summary = build_summary(&identity(), &supplied, &schema);
    assert!(summary.groups["Input options"].is_empty());
}

#[test]
fn ignored_parameters_do_not_warn() {
    let schema = load_schema();
    let supplied = params(&[
        ("alpha", ParamValue::Integer(1)),
        ("gamma", ParamValue::Integer(2)),
        ("schema_ignore_params", "gamma".into()),
    ]);

    let outcome = ParameterValidator::new(&schema, &JsonSchemaEngine)
        .validate(&supplied)
        .expect("schema compiles");

    assert!(!outcome.has_error);
    assert!(outcome.unexpected_params.is_empty());
    assert!(render_warnings(&outcome, &supplied, true, RenderOptions::monochrome()).is_empty());
}

#[test]
fn reserved_option_fails_validation_and_still_reports_unexpected_keys() {
    let schema = load_schema();
    let supplied = params(&[("resume", ParamValue::Bool(true)), ("gamma", ParamValue::Integer(2))]);

    let outcome = ParameterValidator::new(&schema, &JsonSchemaEngine)
        .validate(&supplied)
        .expect("schema compiles");

    assert!(outcome.has_error);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::ReservedOption);
    assert_eq!(outcome.unexpected_params, vec!["resume".to_string(), "gamma".to_string()]);

    let errors = render_errors(&outcome, RenderOptions::monochrome());
    assert!(errors.contains("Please resubmit with '-resume'"));
    let warnings = render_warnings(&outcome, &supplied, true, RenderOptions::monochrome());
    assert!(warnings.contains("* --gamma: 2"));
    assert!(!warnings.contains("--resume"));
}

#[test]
fn type_errors_are_reported_against_the_parameter() {
    let schema = load_schema();
    let supplied = params(&[("alpha", "many".into())]);

    let outcome = ParameterValidator::new(&schema, &JsonSchemaEngine)
        .validate(&supplied)
        .expect("schema compiles");

    assert!(outcome.has_error);
    let errors = render_errors(&outcome, RenderOptions::monochrome());
    assert!(errors.contains("* --alpha: "));
    assert!(errors.contains("(many)"));
}

#[test]
fn fragment_recovers_titles_and_escapes_values_with_markup() {
    let schema = SchemaModel::from_document(serde_json::json!({
        "definitions": {
            "qc": {
                "title": "Alignment & QC <strict>",
                "properties": { "aligner": { "type": "string", "default": "star" } }
            },
            "sample": {
                "title": "Sample's options",
                "properties": { "label": { "type": "string" } }
            }
        }
    }))
    .expect("schema loads");
    let supplied = params(&[("aligner", "<bwa & \"mem\">".into()), ("label", "a'b".into())]);
    let summary = build_summary(&identity(), &supplied, &schema);

    let fragment = parse_fragment(&render_summary_fragment(&summary, &identity()).expect("encodes")).expect("decodes");

    assert_eq!(fragment.id, "nf-core-demo-summary");
    assert_eq!(
        fragment.group_titles(),
        vec!["Core options", "Alignment & QC <strict>", "Sample's options"]
    );
    assert!(fragment.data.contains("<b>Alignment &amp; QC &lt;strict&gt;</b>"));
    assert!(fragment.data.contains("<b>Sample&#39;s options</b>"));
    assert!(fragment.data.contains("<dt>aligner</dt><dd><samp>&lt;bwa &amp; &quot;mem&quot;&gt;</samp></dd>"));
    assert!(fragment.data.contains("<dt>label</dt><dd><samp>a&#39;b</samp></dd>"));
}
