//! Download file names for exported forms.

use crate::model::form::FormMeta;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Title with every whitespace run (leading and trailing included)
/// replaced by `_`, or `form` when the title is empty, plus the format
/// extension.
pub fn export_file_name(meta: &FormMeta, format: ExportFormat) -> String {
    let stem = if meta.title.is_empty() {
        "form".to_string()
    } else {
        WHITESPACE_RE.replace_all(&meta.title, "_").into_owned()
    };
    format!("{stem}.{}", format.extension())
}
