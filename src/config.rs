use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::export::model::ExportFormat;
use crate::language::SourceLanguage;

/// File name looked up in the current directory when no `--config` is given.
pub const CONFIG_FILE: &str = "depgraph.toml";

/// Configuration loaded from `depgraph.toml`. Every field is optional; CLI flags win.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DepGraphConfig {
    /// Default source language when `--language` is not passed.
    pub language: Option<SourceLanguage>,
    /// Default output format when `--format` is not passed.
    pub format: Option<ExportFormat>,
    /// Size of the most-imported ranking in the run summary.
    pub top: Option<usize>,
    /// Glob patterns removed from the matched file set (in addition to node_modules).
    pub exclude: Option<Vec<String>>,
}

impl DepGraphConfig {
    /// Load configuration from `explicit`, or from [`CONFIG_FILE`] in the current directory.
    ///
    /// A missing default file is silent. A missing explicit file, an unreadable
    /// file, or invalid TOML is logged as a warning and the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Self {
        let config_path = explicit.unwrap_or(Path::new(CONFIG_FILE));

        if !config_path.exists() {
            if explicit.is_some() {
                warn!(path = %config_path.display(), "config file not found, using defaults");
            }
            return Self::default();
        }

        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    debug!(path = %config_path.display(), ?config, "loaded config");
                    config
                }
                Err(err) => {
                    warn!(path = %config_path.display(), %err, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %config_path.display(), %err, "failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
