//! Run summary structures: workflow identity and the default-vs-supplied diff.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::ParamValue;

/// Title of the synthetic group holding workflow identity fields.
pub const CORE_OPTIONS_GROUP: &str = "Core options";

/// Identity of the running workflow as reported by the launcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowIdentity {
    /// Declared pipeline name, usually `<org>/<repo>`.
    pub manifest_name: String,
    /// Optional link for the report section; derived from the name when absent.
    pub homepage: Option<String>,
    pub revision: Option<String>,
    pub run_name: String,
    pub container_engine: Option<String>,
    pub container: Option<String>,
    pub launch_dir: String,
    pub work_dir: String,
    pub project_dir: String,
    pub user_name: String,
    pub profile: String,
    pub config_files: Vec<String>,
}

impl WorkflowIdentity {
    /// Identifier used for the embedded report section.
    pub fn report_id(&self) -> String {
        format!("{}-summary", self.manifest_name.replace('/', "-"))
    }

    /// Link shown alongside the report section.
    pub fn section_href(&self) -> String {
        self.homepage
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.manifest_name))
    }
}

/// One parameter whose supplied value differs from its resolved default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryEntry {
    pub group: String,
    pub param: String,
    pub value: ParamValue,
}

/// Grouped summary of a run, in schema order, preceded by core options.
///
/// Groups with no differing parameters are kept in the structure; renderers
/// skip them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParamsSummary {
    pub groups: IndexMap<String, IndexMap<String, ParamValue>>,
}

impl ParamsSummary {
    /// Groups that have at least one entry, in order.
    pub fn non_empty_groups(&self) -> impl Iterator<Item = (&String, &IndexMap<String, ParamValue>)> {
        self.groups.iter().filter(|(_, params)| !params.is_empty())
    }

    /// Widest parameter name across every group in terminal columns, used for
    /// column alignment.
    pub fn max_name_width(&self) -> usize {
        self.groups
            .values()
            .flat_map(|params| params.keys())
            .map(|name| name.width())
            .max()
            .unwrap_or(0)
    }

    /// Flattens the structure into entries, in group then parameter order.
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.groups
            .iter()
            .flat_map(|(group, params)| {
                params.iter().map(move |(param, value)| SummaryEntry {
                    group: group.clone(),
                    param: param.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// Looks up a parameter in any group.
    pub fn get(&self, param: &str) -> Option<&ParamValue> {
        self.groups.values().find_map(|params| params.get(param))
    }
}
