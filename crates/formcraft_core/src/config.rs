//! Engine configuration.
//!
//! # Responsibility
//! - Hold the defaults a session starts from and the fixed strings the
//!   exporters write.
//! - Load them from an optional JSON file.
//!
//! # Invariants
//! - Every key is optional; a missing key keeps its built-in default.
//! - The core reads no environment variables.

use crate::model::form::FormMeta;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEMA_ID: &str = "https://formcraft.io/schema/v1";
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled Form";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormcraftConfig {
    /// Metadata of a fresh or cleared form.
    pub defaults: FormMeta,
    pub export: ExportConfig,
}

/// Strings written by the schema and document exporters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub schema_id: String,
    /// Title used when the form title is blank.
    pub fallback_title: String,
    pub submit_label: String,
    pub success_message: String,
    /// Message the rendered document shows next to an unanswered required
    /// control.
    pub required_message: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema_id: DEFAULT_SCHEMA_ID.to_string(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            submit_label: "Submit Form".to_string(),
            success_message: "✓ Form submitted successfully!".to_string(),
            required_message: "This field is required".to_string(),
        }
    }
}

impl ExportConfig {
    /// Form title as exported; blank titles become `fallback_title`.
    pub fn display_title<'a>(&'a self, meta: &'a FormMeta) -> &'a str {
        if meta.title.trim().is_empty() {
            &self.fallback_title
        } else {
            &meta.title
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid config json: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl FormcraftConfig {
    /// Parses configuration JSON.
    ///
    /// # Errors
    /// - [`ConfigError::Json`] when the text is not a valid config object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Json)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// - [`ConfigError::Io`] when the file cannot be read.
    /// - [`ConfigError::Json`] when its content is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "event=config_load module=config status=ok custom_schema_id={}",
            config.export.schema_id != DEFAULT_SCHEMA_ID
        );
        Ok(config)
    }
}
