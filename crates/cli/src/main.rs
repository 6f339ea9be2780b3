mod inputs;

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use paramcheck_engine::{JsonSchemaEngine, ParameterValidator, SchemaModel, build_summary, ensure_valid};
use paramcheck_report::{
    HelpRequest, render_errors, render_help, render_parameter, render_summary_fragment, render_summary_text,
    render_warnings,
};
use paramcheck_types::{ParamValue, ParamValueError, RenderOptions};
use paramcheck_util::Settings;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COMMAND: &str = "nextflow run <pipeline> --input samplesheet.csv --outdir <OUTDIR> -profile docker";

/// Validate pipeline parameters against a grouped schema and summarise runs.
#[derive(Parser, Debug)]
#[command(name = "paramcheck", version, about, disable_help_subcommand = true)]
struct Cli {
    /// Disable ANSI colours in report output
    #[arg(long, global = true)]
    monochrome: bool,

    /// Path to the settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print help generated from the schema
    Help(HelpArgs),
    /// Validate parameters; exits non-zero when validation fails
    Validate(ValidateArgs),
    /// Print the parameters that differ from their defaults
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct SchemaArg {
    /// Path to the parameter schema (JSON or YAML)
    #[arg(long, value_name = "PATH", default_value = "nextflow_schema.json")]
    schema: PathBuf,
}

#[derive(Args, Debug)]
struct ParamsArgs {
    /// JSON or YAML file holding parameter values
    #[arg(long, value_name = "PATH")]
    params_file: Option<PathBuf>,

    /// A single parameter assignment; may be repeated
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param, allow_hyphen_values = true)]
    params: Vec<(String, ParamValue)>,
}

#[derive(Args, Debug)]
struct HelpArgs {
    #[command(flatten)]
    schema: SchemaArg,

    /// Example invocation shown at the top of the help
    #[arg(long, value_name = "TEXT")]
    command: Option<String>,

    /// Include hidden parameters
    #[arg(long)]
    show_hidden: bool,

    /// Line width used to wrap descriptions
    #[arg(long, value_name = "N")]
    width: Option<usize>,

    /// Show detailed help for a single parameter
    param: Option<String>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    schema: SchemaArg,

    #[command(flatten)]
    params: ParamsArgs,

    /// Repeat reserved-option collisions in the unexpected-parameter warnings
    #[arg(long)]
    no_dedupe: bool,

    /// Skip validation entirely
    #[arg(long)]
    skip_validation: bool,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    schema: SchemaArg,

    #[command(flatten)]
    params: ParamsArgs,

    /// JSON or YAML file describing the running workflow
    #[arg(long, value_name = "PATH")]
    workflow: Option<PathBuf>,

    /// Write the HTML/YAML report fragment to this file
    #[arg(long, value_name = "PATH")]
    report_out: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    let options = render_options(cli.monochrome, &settings);

    match cli.command {
        Command::Help(args) => run_help(args, &settings, options),
        Command::Validate(args) => run_validate(args, &settings, options),
        Command::Summary(args) => run_summary(args, options),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_param(raw: &str) -> Result<(String, ParamValue), ParamValueError> {
    ParamValue::parse_assignment(raw)
}

fn render_options(monochrome_flag: bool, settings: &Settings) -> RenderOptions {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    RenderOptions {
        monochrome: monochrome_flag || no_color || settings.monochrome,
    }
}

fn run_help(args: HelpArgs, settings: &Settings, options: RenderOptions) -> Result<ExitCode> {
    let schema = SchemaModel::load_or_empty(&args.schema.schema);

    if let Some(name) = args.param {
        let Some(text) = render_parameter(&schema, &name, options) else {
            bail!("parameter '--{}' is not declared in {}", name, args.schema.schema.display());
        };
        print!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    let request = HelpRequest {
        command: args.command.unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
        line_width: args.width.unwrap_or(settings.line_width),
        show_hidden: args.show_hidden || settings.show_hidden,
    };
    print!("{}", render_help(&schema, &request, options));
    Ok(ExitCode::SUCCESS)
}

fn run_validate(args: ValidateArgs, settings: &Settings, options: RenderOptions) -> Result<ExitCode> {
    let params = inputs::collect_params(args.params.params_file.as_deref(), &args.params.params)?;
    if args.skip_validation || inputs::validation_disabled(&params) {
        info!("Skipping validation of pipeline parameters");
        return Ok(ExitCode::SUCCESS);
    }

    let schema_path = &args.schema.schema;
    let schema = SchemaModel::load(schema_path).with_context(|| format!("failed to load schema {}", schema_path.display()))?;
    let outcome = ParameterValidator::new(&schema, &JsonSchemaEngine)
        .with_ignored(settings.ignore_params.iter().cloned())
        .validate(&params)
        .with_context(|| format!("schema {} could not be compiled", schema_path.display()))?;

    let dedupe = settings.dedupe_reserved && !args.no_dedupe;
    eprint!("{}", render_warnings(&outcome, &params, dedupe, options));
    eprint!("{}", render_errors(&outcome, options));

    match ensure_valid(outcome) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            warn!(error = %error, "Parameter validation failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_summary(args: SummaryArgs, options: RenderOptions) -> Result<ExitCode> {
    let schema = SchemaModel::load_or_empty(&args.schema.schema);
    let params = inputs::collect_params(args.params.params_file.as_deref(), &args.params.params)?;
    let identity = inputs::load_identity(args.workflow.as_deref())?;

    let summary = build_summary(&identity, &params, &schema);
    print!("{}", render_summary_text(&summary, options));

    if let Some(path) = args.report_out {
        let fragment = render_summary_fragment(&summary, &identity)?;
        fs::write(&path, fragment).with_context(|| format!("failed to write report fragment {}", path.display()))?;
        debug!(path = %path.display(), "Wrote report fragment");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_params_parse_into_typed_values() {
        let cli = Cli::try_parse_from([
            "paramcheck",
            "validate",
            "--schema",
            "schema.json",
            "--param",
            "max_memory=8.GB",
            "--param",
            "--outdir=./out",
        ])
        .expect("arguments parse");

        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.params.params.len(), 2);
        assert_eq!(args.params.params[1], ("outdir".to_string(), ParamValue::from("./out")));
        assert!(matches!(args.params.params[0].1, ParamValue::Size(_)));
    }

    #[test]
    fn malformed_params_are_rejected() {
        let result = Cli::try_parse_from(["paramcheck", "validate", "--param", "no-separator"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_forces_monochrome() {
        temp_env::with_var("NO_COLOR", Some("1"), || {
            assert!(render_options(false, &Settings::default()).monochrome);
        });
        temp_env::with_var("NO_COLOR", None::<&str>, || {
            assert!(!render_options(false, &Settings::default()).monochrome);
            assert!(render_options(true, &Settings::default()).monochrome);
        });
    }
}
