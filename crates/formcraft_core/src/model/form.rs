//! Form document and editor session state.
//!
//! # Invariants
//! - `fields` never contains two fields with the same id.
//! - `selected_field_id`, when set by the reducer, names a field in
//!   `fields`; collaborators may still select an arbitrary id.
//! - `is_dirty` is only reset by an explicit clear or schema load.

use crate::model::field::{Field, FieldId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const DEFAULT_FORM_TITLE: &str = "My Awesome Form";
pub const DEFAULT_FORM_DESCRIPTION: &str = "Fill out the form below to get started.";

/// Form-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMeta {
    pub title: String,
    pub description: String,
}

impl FormMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Default for FormMeta {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_TITLE, DEFAULT_FORM_DESCRIPTION)
    }
}

/// Partial update for [`FormMeta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl MetaPatch {
    pub fn apply_to(self, meta: &mut FormMeta) {
        if let Some(title) = self.title {
            meta.title = title;
        }
        if let Some(description) = self.description {
            meta.description = description;
        }
    }
}

/// Editor view currently shown by the UI collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorTab {
    #[default]
    Builder,
    Preview,
    Export,
}

impl Display for EditorTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Builder => "builder",
            Self::Preview => "preview",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// The single live form document of an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub meta: FormMeta,
    pub fields: Vec<Field>,
    pub selected_field_id: Option<FieldId>,
    pub active_tab: EditorTab,
    pub is_dirty: bool,
}

impl FormState {
    /// Empty document with the given metadata.
    pub fn new(meta: FormMeta) -> Self {
        Self {
            meta,
            fields: Vec::new(),
            selected_field_id: None,
            active_tab: EditorTab::Builder,
            is_dirty: false,
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Currently selected field, if the selection names an existing field.
    pub fn selected_field(&self) -> Option<&Field> {
        self.selected_field_id
            .as_deref()
            .and_then(|id| self.field(id))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormMeta::default())
    }
}
