//! Form state transitions.
//!
//! # Responsibility
//! - Apply one [`Intent`] to a [`FormState`] and return the next state.
//! - Own the id source so every created field gets a session-unique id.
//!
//! # Invariants
//! - Transitions never fail: an intent naming an unknown field or option
//!   returns the input state unchanged (including `is_dirty`).
//! - The input state is never mutated; readers holding it see either the
//!   old or the new document, never a mix.
//! - Field ids stay unique after every transition.
//! - Selection and tab changes do not mark the document dirty.

use crate::export::schema::{fields_from_schema, SchemaDocument};
use crate::model::field::{Field, FieldId, FieldKind, FieldOption};
use crate::model::form::{FormMeta, FormState};
use crate::registry::field_types;
use crate::store::ids::IdSource;
use crate::store::intent::Intent;
use log::{debug, info};

/// Reducer over [`FormState`] values.
pub struct FormReducer<I: IdSource> {
    ids: I,
    initial_meta: FormMeta,
}

impl<I: IdSource> FormReducer<I> {
    /// Creates a reducer whose `clear` restores the default metadata.
    pub fn new(ids: I) -> Self {
        Self::with_initial_meta(ids, FormMeta::default())
    }

    /// Creates a reducer whose `clear` restores `initial_meta`.
    pub fn with_initial_meta(ids: I, initial_meta: FormMeta) -> Self {
        Self { ids, initial_meta }
    }

    /// Empty document used at session start and by `clear`.
    pub fn initial_state(&self) -> FormState {
        FormState::new(self.initial_meta.clone())
    }

    /// Applies `intent` to `state` and returns the resulting state.
    pub fn apply(&mut self, state: &FormState, intent: Intent) -> FormState {
        let name = intent.name();
        match self.reduce(state, intent) {
            Some(next) => {
                debug!(
                    "event=intent_apply module=reducer status=ok intent={} field_count={} dirty={}",
                    name,
                    next.fields.len(),
                    next.is_dirty
                );
                next
            }
            None => {
                debug!(
                    "event=intent_apply module=reducer status=noop intent={}",
                    name
                );
                state.clone()
            }
        }
    }

    fn reduce(&mut self, state: &FormState, intent: Intent) -> Option<FormState> {
        match intent {
            Intent::SetTab(tab) => {
                let mut next = state.clone();
                next.active_tab = tab;
                Some(next)
            }
            Intent::SetMeta(patch) => {
                let mut next = state.clone();
                patch.apply_to(&mut next.meta);
                next.is_dirty = true;
                Some(next)
            }
            Intent::AddField(kind) => Some(self.insert_new(state, kind, state.fields.len())),
            Intent::AddFieldAt { kind, index } => Some(self.insert_new(state, kind, index)),
            Intent::RemoveField(id) => remove_field(state, &id),
            Intent::DuplicateField(id) => self.duplicate_field(state, &id),
            Intent::ReorderFields { active_id, over_id } => {
                reorder_fields(state, &active_id, &over_id)
            }
            Intent::SelectField(id) => {
                let mut next = state.clone();
                next.selected_field_id = id;
                Some(next)
            }
            Intent::UpdateField { field_id, patch } => {
                update_field(state, &field_id, |field| {
                    field.apply_patch(patch);
                    true
                })
            }
            Intent::UpdateValidation { field_id, patch } => {
                update_field(state, &field_id, |field| match field.control_mut() {
                    Some(control) => {
                        patch.apply_to(&mut control.validation);
                        true
                    }
                    None => false,
                })
            }
            Intent::UpdateConditional { field_id, patch } => {
                update_field(state, &field_id, |field| match field.control_mut() {
                    Some(control) => {
                        patch.apply_to(&mut control.conditional_logic);
                        true
                    }
                    None => false,
                })
            }
            Intent::AddOption(field_id) => {
                let value = self.ids.next_option_value();
                update_field(state, &field_id, |field| match field.options_mut() {
                    Some(options) => {
                        let label = format!("Option {}", options.len() + 1);
                        options.push(FieldOption::new(label, value));
                        true
                    }
                    None => false,
                })
            }
            Intent::UpdateOption {
                field_id,
                index,
                patch,
            } => update_field(state, &field_id, |field| {
                match field.options_mut().and_then(|options| options.get_mut(index)) {
                    Some(option) => {
                        patch.apply_to(option);
                        true
                    }
                    None => false,
                }
            }),
            Intent::RemoveOption { field_id, index } => {
                update_field(state, &field_id, |field| match field.options_mut() {
                    Some(options) if index < options.len() => {
                        options.remove(index);
                        true
                    }
                    _ => false,
                })
            }
            Intent::Clear => {
                let mut next = self.initial_state();
                next.active_tab = state.active_tab;
                info!(
                    "event=form_clear module=reducer status=ok removed_fields={}",
                    state.fields.len()
                );
                Some(next)
            }
            Intent::LoadSchema(schema) => Some(load_schema(state, &schema, &mut self.ids)),
        }
    }

    fn insert_new(&mut self, state: &FormState, kind: FieldKind, index: usize) -> FormState {
        let mut field = field_types::create(kind, &mut self.ids);
        if state.contains(field.id()) {
            let id = self.fresh_field_id(&state.fields);
            field = Field::new(id, field.body().clone());
        }

        let mut next = state.clone();
        let index = index.min(next.fields.len());
        next.selected_field_id = Some(field.id().to_string());
        next.fields.insert(index, field);
        next.is_dirty = true;
        next
    }

    fn duplicate_field(&mut self, state: &FormState, id: &str) -> Option<FormState> {
        let index = state.position(id)?;
        let copy_id = self.fresh_field_id(&state.fields);
        let copy = state.fields[index].duplicate_as(copy_id.clone());

        let mut next = state.clone();
        next.fields.insert(index + 1, copy);
        next.selected_field_id = Some(copy_id);
        next.is_dirty = true;
        Some(next)
    }

    fn fresh_field_id(&mut self, fields: &[Field]) -> FieldId {
        let mut candidate = self.ids.next_field_id();
        let mut attempt = 1_u32;
        while fields.iter().any(|field| field.id() == candidate) {
            candidate = format!("{}_{attempt}", self.ids.next_field_id());
            attempt += 1;
        }
        candidate
    }
}

fn remove_field(state: &FormState, id: &str) -> Option<FormState> {
    let removed_index = state.position(id)?;
    let mut next = state.clone();
    next.fields.remove(removed_index);

    if state.selected_field_id.as_deref() == Some(id) {
        next.selected_field_id = next
            .fields
            .get(removed_index.saturating_sub(1))
            .map(|field| field.id().to_string());
    }
    next.is_dirty = true;
    Some(next)
}

fn reorder_fields(state: &FormState, active_id: &str, over_id: &str) -> Option<FormState> {
    let from = state.position(active_id)?;
    let to = state.position(over_id)?;
    if from == to {
        return None;
    }

    let mut next = state.clone();
    let moved = next.fields.remove(from);
    next.fields.insert(to, moved);
    next.is_dirty = true;
    Some(next)
}

/// Clones `state`, runs `edit` on the named field and keeps the result only
/// when the edit reports a change.
fn update_field(
    state: &FormState,
    id: &str,
    edit: impl FnOnce(&mut Field) -> bool,
) -> Option<FormState> {
    let index = state.position(id)?;
    let mut next = state.clone();
    if !edit(&mut next.fields[index]) {
        return None;
    }
    next.is_dirty = true;
    Some(next)
}

fn load_schema(
    state: &FormState,
    schema: &SchemaDocument,
    ids: &mut impl IdSource,
) -> FormState {
    let meta = match &schema.meta {
        Some(meta) => FormMeta {
            title: meta.title.clone().unwrap_or_else(|| state.meta.title.clone()),
            description: meta
                .description
                .clone()
                .unwrap_or_else(|| state.meta.description.clone()),
        },
        None => state.meta.clone(),
    };
    let fields = fields_from_schema(schema, ids);
    info!(
        "event=schema_load module=reducer status=ok field_count={} has_meta={}",
        fields.len(),
        schema.meta.is_some()
    );

    FormState {
        meta,
        fields,
        selected_field_id: None,
        active_tab: state.active_tab,
        is_dirty: false,
    }
}

#[cfg(test)]
mod tests {
    use super::FormReducer;
    use crate::model::field::FieldKind;
    use crate::store::ids::IdSource;
    use crate::store::intent::Intent;

    /// Source that keeps handing out the same id.
    struct StuckIds;

    impl IdSource for StuckIds {
        fn next_field_id(&mut self) -> String {
            "field_same".to_string()
        }

        fn next_option_value(&mut self) -> String {
            "option_same".to_string()
        }
    }

    #[test]
    fn colliding_id_source_still_yields_unique_ids() {
        let mut reducer = FormReducer::new(StuckIds);
        let mut state = reducer.initial_state();
        for _ in 0..4 {
            state = reducer.apply(&state, Intent::AddField(FieldKind::Text));
        }
        let first = state.fields[0].id().to_string();
        state = reducer.apply(&state, Intent::DuplicateField(first));

        let mut ids: Vec<&str> = state.fields.iter().map(|field| field.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
