//! Whole-form helpers used by the preview and the condition editor.

use crate::eval::validate::validate;
use crate::eval::visibility::{is_visible, FormValues};
use crate::model::field::{Field, FieldId};
use crate::model::value::FieldValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validation errors keyed by field id.
pub type FormErrors = BTreeMap<FieldId, String>;

/// Validates every visible, value-collecting field.
///
/// Hidden fields and layout blocks are skipped. An empty result means the
/// submission passes.
pub fn validate_form(fields: &[Field], values: &FormValues) -> FormErrors {
    fields
        .iter()
        .filter(|field| field.kind().accepts_input() && is_visible(field, values))
        .filter_map(|field| {
            validate(field, values.get(field.id())).map(|message| (field.id().to_string(), message))
        })
        .collect()
}

/// Answers of a passing preview submission keyed by field label.
///
/// Every value-collecting field appears, hidden ones included. The id
/// stands in for an empty label, unanswered fields map to `null` and a
/// later field replaces an earlier one with the same label.
pub fn submission_payload(fields: &[Field], values: &FormValues) -> Map<String, Value> {
    fields
        .iter()
        .filter(|field| field.kind().accepts_input())
        .map(|field| {
            let key = match field.label() {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => field.id().to_string(),
            };
            let value = values
                .get(field.id())
                .map_or(Value::Null, FieldValue::to_json);
            (key, value)
        })
        .collect()
}

/// Fields a condition on `field_id` may reference, in list order.
///
/// Every input or choice field qualifies except `field_id` itself.
pub fn condition_sources<'a>(fields: &'a [Field], field_id: &str) -> Vec<&'a Field> {
    fields
        .iter()
        .filter(|field| field.id() != field_id && field.kind().accepts_input())
        .collect()
}
