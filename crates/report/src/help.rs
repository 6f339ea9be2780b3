//! Command-line help generated from the schema.
//!
//! Parameter names are aligned across *all* groups, so the widest name in the
//! whole schema decides the name column.

use paramcheck_engine::SchemaModel;
use paramcheck_types::{ParamSpec, RenderOptions};
use paramcheck_util::{LogColours, dashed_line, pad_right, wrap_words};

/// Width of the `[type]` column, including its trailing padding.
const TYPE_COLUMN_WIDTH: usize = 10;
/// Leading indent plus the `--` prefix.
const NAME_PREFIX_WIDTH: usize = 4;

/// Inputs for [`render_help`] besides the schema.
#[derive(Debug, Clone)]
pub struct HelpRequest {
    /// Example invocation printed at the top.
    pub command: String,
    pub line_width: usize,
    pub show_hidden: bool,
}

/// Renders help for every group in schema order.
///
/// Groups without visible parameters are omitted. Hidden parameters are
/// counted into a trailing notice unless `show_hidden` is set.
pub fn render_help(schema: &SchemaModel, request: &HelpRequest, options: RenderOptions) -> String {
    let colours = LogColours::new(options);
    let name_column = schema.max_name_width(request.show_hidden) + 1;
    let description_indent = NAME_PREFIX_WIDTH + name_column + TYPE_COLUMN_WIDTH;
    let description_width = request.line_width.saturating_sub(description_indent);

    let mut output = String::new();
    output.push_str("Typical pipeline command:\n\n");
    output.push_str(&format!("  {}{}{}\n\n", colours.cyan, request.command, colours.reset));

    let mut hidden_count = 0;
    for group in schema.groups() {
        let mut lines = Vec::new();
        for (name, spec) in &group.parameters {
            if spec.hidden && !request.show_hidden {
                hidden_count += 1;
                continue;
            }
            lines.push(parameter_line(
                name,
                spec,
                &colours,
                name_column,
                description_indent,
                description_width,
            ));
        }
        if lines.is_empty() {
            continue;
        }
        output.push_str(&format!("{}{}{}{}\n", colours.underlined, colours.bold, group.title, colours.reset));
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }

    if hidden_count > 0 {
        output.push_str(&format!(
            "{}!! Hiding {} params, use --show_hidden_params to show them !!{}\n",
            colours.dim, hidden_count, colours.reset
        ));
    }
    output.push_str(&dashed_line(&colours));
    output.push('\n');
    output
}

fn parameter_line(
    name: &str,
    spec: &ParamSpec,
    colours: &LogColours,
    name_column: usize,
    description_indent: usize,
    description_width: usize,
) -> String {
    let type_tag = format!("[{}]", spec.r#type);
    let description = if spec.description.chars().count() > description_width {
        wrap_words(&spec.description, description_width).join(&format!("\n{}", " ".repeat(description_indent)))
    } else {
        spec.description.clone()
    };
    let default = spec
        .default
        .as_ref()
        .map(|value| format!("{} [default: {}]{}", colours.dim, value, colours.reset))
        .unwrap_or_default();

    format!(
        "  {}--{}{}{}{}{}{}{}",
        colours.bold,
        pad_right(name, name_column),
        colours.reset,
        colours.dim,
        pad_right(&type_tag, TYPE_COLUMN_WIDTH),
        colours.reset,
        description,
        default
    )
}

/// Detailed help for a single parameter, or `None` when the schema does not
/// declare it.
pub fn render_parameter(schema: &SchemaModel, name: &str, options: RenderOptions) -> Option<String> {
    let (group, spec) = schema.find(name)?;
    let colours = LogColours::new(options);

    let mut fields = vec![("group", group.to_string()), ("type", spec.r#type.to_string())];
    if !spec.description.is_empty() {
        fields.push(("description", spec.description.clone()));
    }
    if let Some(help_text) = &spec.help_text {
        fields.push(("help_text", help_text.clone()));
    }
    if !spec.enum_values.is_empty() {
        let choices: Vec<String> = spec.enum_values.iter().map(ToString::to_string).collect();
        fields.push(("choices", choices.join(", ")));
    }
    if let Some(default) = &spec.default {
        fields.push(("default", default.to_string()));
    }

    let label_width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut output = format!("{}--{}{}\n", colours.bold, name, colours.reset);
    for (label, value) in fields {
        output.push_str(&format!(
            "    {}{}{}: {}\n",
            colours.dim,
            pad_right(label, label_width),
            colours.reset,
            value
        ));
    }
    output.push_str(&dashed_line(&colours));
    output.push('\n');
    Some(output)
}
