//! Renderings of the run summary.
//!
//! The text form goes to the terminal. The fragment form is a small YAML
//! document whose `data` field holds an HTML definition list, ready to be
//! embedded in a generated report.

use paramcheck_types::{ParamValue, ParamsSummary, RenderOptions, WorkflowIdentity};
use paramcheck_util::{LogColours, dashed_line, escape_html, pad_right, unescape_html};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FRAGMENT_DESCRIPTION: &str = " - this information is collected when the pipeline is started.";
const MISSING_VALUE_HTML: &str = r#"<span style="color:#999999;">N/A</span>"#;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode report fragment: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("failed to parse report fragment: {0}")]
    Decode(#[source] serde_yaml::Error),
}

/// YAML envelope around the HTML summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFragment {
    pub id: String,
    pub description: String,
    pub section_name: String,
    pub section_href: String,
    pub plot_type: String,
    pub data: String,
}

impl ReportFragment {
    /// Group titles found in the HTML block, in order, with HTML entities
    /// decoded.
    pub fn group_titles(&self) -> Vec<String> {
        let mut titles = Vec::new();
        let mut remainder = self.data.as_str();
        while let Some(start) = remainder.find("<b>") {
            let after_start = &remainder[start + 3..];
            let Some(end) = after_start.find("</b>") else {
                break;
            };
            titles.push(unescape_html(&after_start[..end]));
            remainder = &after_start[end + 4..];
        }
        titles
    }
}

/// Aligned text summary of every non-empty group, followed by a note that only
/// non-default values are listed.
pub fn render_summary_text(summary: &ParamsSummary, options: RenderOptions) -> String {
    let colours = LogColours::new(options);
    let width = summary.max_name_width();

    let mut output = String::new();
    for (group, params) in summary.non_empty_groups() {
        output.push_str(&format!("{}{}{}\n", colours.bold, group, colours.reset));
        for (name, value) in params {
            output.push_str(&format!(
                "  {}{}{}: {}{}{}\n",
                colours.blue,
                pad_right(name, width),
                colours.reset,
                colours.green,
                value,
                colours.reset
            ));
        }
        output.push('\n');
    }
    output.push_str(&dashed_line(&colours));
    output.push('\n');
    output.push_str(&format!(
        "{}Only displaying parameters that differ from the pipeline defaults{}\n",
        colours.dim, colours.reset
    ));
    output.push_str(&dashed_line(&colours));
    output.push('\n');
    output
}

/// HTML definition lists for every non-empty group wrapped in the YAML
/// envelope.
pub fn render_summary_fragment(summary: &ParamsSummary, identity: &WorkflowIdentity) -> Result<String, ReportError> {
    let fragment = ReportFragment {
        id: identity.report_id(),
        description: FRAGMENT_DESCRIPTION.to_string(),
        section_name: format!("{} Workflow Summary", identity.manifest_name),
        section_href: identity.section_href(),
        plot_type: "html".to_string(),
        data: summary_html(summary),
    };
    serde_yaml::to_string(&fragment).map_err(ReportError::Encode)
}

/// Reads back a fragment produced by [`render_summary_fragment`].
pub fn parse_fragment(text: &str) -> Result<ReportFragment, ReportError> {
    serde_yaml::from_str(text).map_err(ReportError::Decode)
}

pub(crate) fn summary_html(summary: &ParamsSummary) -> String {
    let mut html = String::new();
    for (group, params) in summary.non_empty_groups() {
        html.push_str(&format!(
            "<p style=\"font-size:110%\"><b>{}</b></p>\n",
            escape_html(group)
        ));
        html.push_str("<dl class=\"dl-horizontal\">\n");
        for (name, value) in params {
            html.push_str(&format!(
                "    <dt>{}</dt><dd><samp>{}</samp></dd>\n",
                escape_html(name),
                html_value(value)
            ));
        }
        html.push_str("</dl>\n");
    }
    html
}

fn html_value(value: &ParamValue) -> String {
    let rendered = value.to_string();
    if rendered.is_empty() {
        MISSING_VALUE_HTML.to_string()
    } else {
        escape_html(&rendered)
    }
}
