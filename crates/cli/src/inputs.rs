//! Reading parameter maps and workflow identity from disk and the command line.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use paramcheck_types::{ParamValue, ParameterMap, WorkflowIdentity};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Parameter that disables validation when set to `false`.
pub const VALIDATE_PARAMS_KEY: &str = "validate_params";

/// Builds the parameter map from an optional params file followed by
/// command-line assignments. Later assignments replace earlier values but keep
/// the key's original position.
pub fn collect_params(params_file: Option<&Path>, assignments: &[(String, ParamValue)]) -> Result<ParameterMap> {
    let mut params = match params_file {
        Some(path) => read_document::<ParameterMap>(path).with_context(|| format!("failed to read params file {}", path.display()))?,
        None => ParameterMap::new(),
    };
    for (name, value) in assignments {
        params.insert(name.clone(), value.clone());
    }
    debug!(count = params.len(), "Collected pipeline parameters");
    Ok(params)
}

/// Reads the workflow identity, or returns an empty identity when no file is given.
pub fn load_identity(path: Option<&Path>) -> Result<WorkflowIdentity> {
    match path {
        Some(path) => read_document(path).with_context(|| format!("failed to read workflow identity {}", path.display())),
        None => Ok(WorkflowIdentity::default()),
    }
}

/// `true` when the supplied parameters switch validation off.
pub fn validation_disabled(params: &ParameterMap) -> bool {
    matches!(params.get(VALIDATE_PARAMS_KEY), Some(ParamValue::Bool(false)))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}
