//! User intents accepted by the reducer.

use crate::export::schema::SchemaDocument;
use crate::model::field::{FieldId, FieldKind, FieldPatch, OptionPatch};
use crate::model::form::{EditorTab, MetaPatch};
use crate::model::logic::LogicPatch;
use crate::model::rules::ValidationPatch;

/// One discrete editor action.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetTab(EditorTab),
    SetMeta(MetaPatch),
    AddField(FieldKind),
    /// Inserts at `index`; an index past the end appends.
    AddFieldAt {
        kind: FieldKind,
        index: usize,
    },
    RemoveField(FieldId),
    DuplicateField(FieldId),
    /// Moves `active_id` to the position currently held by `over_id`.
    ReorderFields {
        active_id: FieldId,
        over_id: FieldId,
    },
    SelectField(Option<FieldId>),
    UpdateField {
        field_id: FieldId,
        patch: FieldPatch,
    },
    UpdateValidation {
        field_id: FieldId,
        patch: ValidationPatch,
    },
    UpdateConditional {
        field_id: FieldId,
        patch: LogicPatch,
    },
    AddOption(FieldId),
    UpdateOption {
        field_id: FieldId,
        index: usize,
        patch: OptionPatch,
    },
    RemoveOption {
        field_id: FieldId,
        index: usize,
    },
    Clear,
    LoadSchema(Box<SchemaDocument>),
}

impl Intent {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTab(_) => "set_tab",
            Self::SetMeta(_) => "set_meta",
            Self::AddField(_) => "add_field",
            Self::AddFieldAt { .. } => "add_field_at",
            Self::RemoveField(_) => "remove_field",
            Self::DuplicateField(_) => "duplicate_field",
            Self::ReorderFields { .. } => "reorder_fields",
            Self::SelectField(_) => "select_field",
            Self::UpdateField { .. } => "update_field",
            Self::UpdateValidation { .. } => "update_validation",
            Self::UpdateConditional { .. } => "update_conditional",
            Self::AddOption(_) => "add_option",
            Self::UpdateOption { .. } => "update_option",
            Self::RemoveOption { .. } => "remove_option",
            Self::Clear => "clear",
            Self::LoadSchema(_) => "load_schema",
        }
    }
}
