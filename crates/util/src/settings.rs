//! Persistent defaults for the paramcheck CLI.
//!
//! Settings live in a small JSON file in the standard configuration directory
//! (`~/.config/paramcheck/settings.json` on most platforms). A missing file
//! yields defaults; an unparseable one is logged and ignored so a broken
//! settings file never blocks validation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use paramcheck_types::RenderOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "PARAMCHECK_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Line width used for help output when none is configured.
pub const DEFAULT_LINE_WIDTH: usize = 160;

/// Error surfaced when reading settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure other than a missing file.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-level defaults; every field can be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Disable ANSI colour tokens in text output.
    pub monochrome: bool,
    /// Total width available to help output.
    pub line_width: usize,
    /// Include hidden schema parameters in help output.
    pub show_hidden: bool,
    /// Drop unexpected-parameter warnings for keys already reported as reserved options.
    pub dedupe_reserved: bool,
    /// Extra parameter names excluded from the unexpected-parameter check.
    pub ignore_params: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monochrome: false,
            line_width: DEFAULT_LINE_WIDTH,
            show_hidden: false,
            dedupe_reserved: true,
            ignore_params: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from an explicit path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let resolved = path.map(Path::to_path_buf).unwrap_or_else(default_settings_path);
        load_payload(&resolved)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            monochrome: self.monochrome,
        }
    }
}

/// Get the default path for the settings file.
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paramcheck")
        .join(SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<Settings, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => {
                debug!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(Settings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(Some(directory.path().join("absent.json").as_path())).expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.line_width, DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"monochrome": true, "ignore_params": ["igenomes_base"]}}"#).expect("write settings");

        let settings = Settings::load(Some(file.path())).expect("settings");
        assert!(settings.monochrome);
        assert_eq!(settings.ignore_params, vec!["igenomes_base".to_string()]);
        assert_eq!(settings.line_width, DEFAULT_LINE_WIDTH);
        assert!(settings.render_options().monochrome);
        assert!(settings.dedupe_reserved);
    }

    #[test]
    fn unparseable_file_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write settings");

        let settings = Settings::load(Some(file.path())).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn env_override_controls_default_path() {
        temp_env::with_var(SETTINGS_PATH_ENV, Some("/tmp/custom-settings.json"), || {
            assert_eq!(default_settings_path(), PathBuf::from("/tmp/custom-settings.json"));
        });
    }
}
