//! Editing session service.
//!
//! # Responsibility
//! - Own the single live [`FormState`] and thread it through the reducer.
//! - Offer use-case entry points for editor, preview and export
//!   collaborators.
//!
//! # Invariants
//! - The reducer is the only writer of the session state.
//! - Readers borrow the state between dispatches and never observe a
//!   partially applied intent.

use crate::config::FormcraftConfig;
use crate::eval::preview::{condition_sources, submission_payload, validate_form, FormErrors};
use crate::eval::visibility::{is_visible, FormValues};
use crate::export::document::to_document;
use crate::export::file_name::{export_file_name, ExportFormat};
use crate::export::schema::{parse_schema, schema_to_json, to_schema, SchemaDocument, SchemaError};
use crate::model::field::{Field, FieldId, FieldKind};
use crate::model::form::FormState;
use crate::model::logic::{Condition, ConditionOperator, ConditionPatch, LogicPatch};
use crate::store::ids::{IdSource, SessionIdSource};
use crate::store::intent::Intent;
use crate::store::reducer::FormReducer;
use serde_json::{Map, Value};

/// One editing session over one form.
pub struct FormSession<I: IdSource = SessionIdSource> {
    state: FormState,
    reducer: FormReducer<I>,
    config: FormcraftConfig,
}

impl FormSession<SessionIdSource> {
    /// Starts a session with built-in defaults.
    pub fn new() -> Self {
        Self::with_config(FormcraftConfig::default())
    }

    /// Starts a session whose initial metadata and export strings come
    /// from `config`.
    pub fn with_config(config: FormcraftConfig) -> Self {
        Self::with_id_source(config, SessionIdSource::new())
    }
}

impl Default for FormSession<SessionIdSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> FormSession<I> {
    /// Starts a session drawing ids from `ids`.
    pub fn with_id_source(config: FormcraftConfig, ids: I) -> Self {
        let reducer = FormReducer::with_initial_meta(ids, config.defaults.clone());
        Self {
            state: reducer.initial_state(),
            reducer,
            config,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn config(&self) -> &FormcraftConfig {
        &self.config
    }

    /// Applies one intent and returns the resulting state.
    pub fn dispatch(&mut self, intent: Intent) -> &FormState {
        self.state = self.reducer.apply(&self.state, intent);
        &self.state
    }

    /// Appends a field of the kind named `kind`.
    ///
    /// # Contract
    /// - Unknown kind names leave the state untouched and return `None`.
    /// - Returns the id of the new (and now selected) field.
    pub fn add_field_named(&mut self, kind: &str) -> Option<FieldId> {
        let kind = kind.parse::<FieldKind>().ok()?;
        self.dispatch(Intent::AddField(kind));
        self.state.selected_field_id.clone()
    }

    /// Fields a condition on `field_id` may reference.
    pub fn condition_sources(&self, field_id: &str) -> Vec<&Field> {
        condition_sources(&self.state.fields, field_id)
    }

    /// Appends a condition to `field_id`'s logic.
    ///
    /// # Contract
    /// - The new condition references the first eligible source field (or
    ///   nothing when there is none), uses `equals` and an empty operand.
    pub fn add_condition(&mut self, field_id: &str) -> &FormState {
        let Some(mut conditions) = self.conditions_of(field_id) else {
            return &self.state;
        };
        let source = self
            .condition_sources(field_id)
            .first()
            .map(|field| field.id().to_string())
            .unwrap_or_default();
        conditions.push(Condition::new(source, ConditionOperator::Equals, ""));
        self.replace_conditions(field_id, conditions)
    }

    /// Merges `patch` into condition `index` of `field_id`.
    pub fn update_condition(
        &mut self,
        field_id: &str,
        index: usize,
        patch: ConditionPatch,
    ) -> &FormState {
        let Some(mut conditions) = self.conditions_of(field_id) else {
            return &self.state;
        };
        let Some(condition) = conditions.get_mut(index) else {
            return &self.state;
        };
        patch.apply_to(condition);
        self.replace_conditions(field_id, conditions)
    }

    /// Removes condition `index` of `field_id`.
    pub fn remove_condition(&mut self, field_id: &str, index: usize) -> &FormState {
        let Some(mut conditions) = self.conditions_of(field_id) else {
            return &self.state;
        };
        if index >= conditions.len() {
            return &self.state;
        }
        conditions.remove(index);
        self.replace_conditions(field_id, conditions)
    }

    /// Fields currently shown for `values`.
    pub fn visible_fields(&self, values: &FormValues) -> Vec<&Field> {
        self.state
            .fields
            .iter()
            .filter(|field| is_visible(field, values))
            .collect()
    }

    /// Preview submission check; empty when every visible field passes.
    pub fn validate_preview(&self, values: &FormValues) -> FormErrors {
        let errors = validate_form(&self.state.fields, values);
        log::debug!(
            "event=preview_validate module=session status=ok field_count={} error_count={}",
            self.state.fields.len(),
            errors.len()
        );
        errors
    }

    /// Answers shown after a passing preview submission.
    pub fn preview_payload(&self, values: &FormValues) -> Map<String, Value> {
        submission_payload(&self.state.fields, values)
    }

    pub fn export_schema(&self) -> SchemaDocument {
        to_schema(&self.state.meta, &self.state.fields, &self.config.export)
    }

    pub fn export_schema_json(&self) -> String {
        schema_to_json(&self.export_schema())
    }

    pub fn export_document(&self) -> String {
        to_document(&self.state.meta, &self.state.fields, &self.config.export)
    }

    /// Renders the form in `format`.
    pub fn export(&self, format: ExportFormat) -> String {
        let text = match format {
            ExportFormat::Json => self.export_schema_json(),
            ExportFormat::Html => self.export_document(),
        };
        log::info!(
            "event=form_export module=session status=ok format={} field_count={} bytes={}",
            format,
            self.state.fields.len(),
            text.len()
        );
        text
    }

    /// Suggested download name for an export in `format`.
    pub fn export_file_name(&self, format: ExportFormat) -> String {
        export_file_name(&self.state.meta, format)
    }

    /// Replaces the document with a decoded schema.
    pub fn load_schema(&mut self, schema: SchemaDocument) -> &FormState {
        self.dispatch(Intent::LoadSchema(Box::new(schema)))
    }

    /// Decodes schema text and loads it.
    ///
    /// # Errors
    /// - Any [`SchemaError`] from decoding; the session is left unchanged.
    pub fn load_schema_json(&mut self, text: &str) -> Result<&FormState, SchemaError> {
        let schema = parse_schema(text).map_err(|err| {
            log::warn!("event=schema_load module=session status=error error={err}");
            err
        })?;
        Ok(self.load_schema(schema))
    }

    fn conditions_of(&self, field_id: &str) -> Option<Vec<Condition>> {
        self.state
            .field(field_id)?
            .conditional_logic()
            .map(|logic| logic.conditions.clone())
    }

    fn replace_conditions(&mut self, field_id: &str, conditions: Vec<Condition>) -> &FormState {
        self.dispatch(Intent::UpdateConditional {
            field_id: field_id.to_string(),
            patch: LogicPatch {
                conditions: Some(conditions),
                ..LogicPatch::default()
            },
        })
    }
}
