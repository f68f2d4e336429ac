//! Portable JSON schema export and import.
//!
//! # Responsibility
//! - Turn form metadata plus fields into a minimal, diff-friendly
//!   [`SchemaDocument`].
//! - Decode schema documents back into strongly typed fields.
//!
//! # Invariants
//! - Export emits `label` for every non-layout field and omits it for
//!   layout blocks; other optional keys appear only when non-empty.
//! - Import never fails on a decoded document: unknown kinds and broken
//!   field records are skipped, missing sections fall back to defaults,
//!   missing or duplicate ids are replaced with fresh ones.

use crate::config::ExportConfig;
use crate::model::field::{
    ChoiceInput, Control, Field, FieldBody, FieldKind, FieldOption, FileInput, HeadingBlock,
    HeadingLevel, ParagraphBlock, TextInput, TextareaInput, ToggleInput,
};
use crate::model::form::FormMeta;
use crate::model::logic::ConditionalLogic;
use crate::model::rules::ValidationRules;
use crate::store::ids::IdSource;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{error, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema format version written by this exporter.
pub const SCHEMA_VERSION: &str = "1.0";

const DEFAULT_TEXTAREA_ROWS: u32 = 4;

/// Top-level schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schemaId", alias = "$schema", default)]
    pub schema_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SchemaMeta>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_fields"
    )]
    pub fields: Option<Vec<SchemaField>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Pruned wire record of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,
    /// Accepted on import only.
    #[serde(default, skip_serializing)]
    pub accept: Option<String>,
    /// Accepted on import only.
    #[serde(default, skip_serializing)]
    pub multiple: Option<bool>,
    /// Accepted on import only.
    #[serde(default, skip_serializing)]
    pub default_value: Option<bool>,
}

/// Errors decoding schema text.
#[derive(Debug)]
pub enum SchemaError {
    /// Text is not valid JSON or has the wrong top-level shape.
    Json(serde_json::Error),
    /// Top-level JSON value is not an object.
    NotAnObject,
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid schema json: {err}"),
            Self::NotAnObject => write!(f, "schema document must be a JSON object"),
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Builds the schema document stamped with the current UTC time.
pub fn to_schema(meta: &FormMeta, fields: &[Field], config: &ExportConfig) -> SchemaDocument {
    to_schema_at(meta, fields, config, Utc::now())
}

/// Builds the schema document stamped with `created_at`.
pub fn to_schema_at(
    meta: &FormMeta,
    fields: &[Field],
    config: &ExportConfig,
    created_at: DateTime<Utc>,
) -> SchemaDocument {
    SchemaDocument {
        schema_id: config.schema_id.clone(),
        version: SCHEMA_VERSION.to_string(),
        meta: Some(SchemaMeta {
            title: Some(config.display_title(meta).to_string()),
            description: Some(meta.description.clone()),
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }),
        fields: Some(fields.iter().map(to_schema_field).collect()),
    }
}

/// Serializes a schema document as pretty-printed JSON.
pub fn schema_to_json(document: &SchemaDocument) -> String {
    match serde_json::to_string_pretty(document) {
        Ok(text) => text,
        Err(err) => {
            // Plain data with string keys; only reachable through a serde_json bug.
            error!("event=schema_encode module=export status=error error={err}");
            "{}".to_string()
        }
    }
}

/// Decodes schema text.
///
/// # Errors
/// - [`SchemaError::NotAnObject`] when the top-level value is not an object.
/// - [`SchemaError::Json`] when the text is not JSON or a section has the
///   wrong type.
pub fn parse_schema(text: &str) -> Result<SchemaDocument, SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(SchemaError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Prunes one field into its wire record.
pub fn to_schema_field(field: &Field) -> SchemaField {
    let mut record = SchemaField {
        id: field.id().to_string(),
        kind: field.kind().as_str().to_string(),
        label: field.label().map(str::to_string),
        placeholder: non_empty(field.placeholder()),
        help_text: non_empty(field.help_text()),
        required: field.is_required().then_some(true),
        content: non_empty(field.content()),
        options: field
            .options()
            .filter(|options| !options.is_empty())
            .map(<[FieldOption]>::to_vec),
        validation: field
            .validation()
            .filter(|rules| !rules.is_empty())
            .cloned(),
        conditional_logic: field
            .conditional_logic()
            .filter(|logic| logic.enabled)
            .cloned(),
        ..SchemaField::default()
    };

    match field.body() {
        FieldBody::Textarea(input) if input.rows > 0 => record.rows = Some(input.rows),
        FieldBody::Heading(block) => record.level = Some(u64::from(block.level.number())),
        _ => {}
    }
    record
}

/// Rebuilds typed fields from a decoded schema.
///
/// Records with unknown kinds are skipped. Missing or duplicate ids are
/// replaced with ids from `ids`.
pub fn fields_from_schema(schema: &SchemaDocument, ids: &mut impl IdSource) -> Vec<Field> {
    let Some(records) = &schema.fields else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(records.len());
    for record in records {
        let Some(body) = body_from_record(record) else {
            warn!(
                "event=schema_field_skip module=export status=skipped kind={}",
                record.kind
            );
            continue;
        };

        let mut id = record.id.trim().to_string();
        while id.is_empty() || seen.contains(&id) {
            warn!("event=schema_field_reid module=export status=ok kind={}", record.kind);
            id = ids.next_field_id();
        }
        seen.insert(id.clone());
        fields.push(Field::new(id, body));
    }
    fields
}

fn body_from_record(record: &SchemaField) -> Option<FieldBody> {
    let kind = record.kind.parse::<FieldKind>().ok()?;
    let control = || Control {
        label: record.label.clone().unwrap_or_default(),
        help_text: record.help_text.clone().unwrap_or_default(),
        required: record.required.unwrap_or(false),
        validation: record.validation.clone().unwrap_or_default(),
        conditional_logic: record.conditional_logic.clone().unwrap_or_default(),
    };
    let text = || TextInput {
        control: control(),
        placeholder: record.placeholder.clone().unwrap_or_default(),
    };
    let choice = || ChoiceInput {
        control: control(),
        options: record.options.clone().unwrap_or_default(),
    };
    let content = || record.content.clone().unwrap_or_default();

    let body = match kind {
        FieldKind::Text => FieldBody::Text(text()),
        FieldKind::Email => FieldBody::Email(text()),
        FieldKind::Number => FieldBody::Number(text()),
        FieldKind::Phone => FieldBody::Phone(text()),
        FieldKind::Url => FieldBody::Url(text()),
        FieldKind::Password => FieldBody::Password(text()),
        FieldKind::Textarea => FieldBody::Textarea(TextareaInput {
            control: control(),
            placeholder: record.placeholder.clone().unwrap_or_default(),
            rows: record
                .rows
                .filter(|rows| *rows > 0)
                .unwrap_or(DEFAULT_TEXTAREA_ROWS),
        }),
        FieldKind::Date => FieldBody::Date(control()),
        FieldKind::File => FieldBody::File(FileInput {
            control: control(),
            accept: record.accept.clone().unwrap_or_default(),
            multiple: record.multiple.unwrap_or(false),
        }),
        FieldKind::Select => FieldBody::Select(choice()),
        FieldKind::Radio => FieldBody::Radio(choice()),
        FieldKind::Checkbox => FieldBody::Checkbox(choice()),
        FieldKind::Toggle => FieldBody::Toggle(ToggleInput {
            control: control(),
            default_value: record.default_value.unwrap_or(false),
        }),
        FieldKind::Heading => FieldBody::Heading(HeadingBlock {
            content: content(),
            level: record
                .level
                .and_then(HeadingLevel::from_number)
                .unwrap_or_default(),
        }),
        FieldKind::Paragraph => FieldBody::Paragraph(ParagraphBlock { content: content() }),
        FieldKind::Divider => FieldBody::Divider,
    };
    Some(body)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Option<Vec<SchemaField>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(values) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let records = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<SchemaField>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("event=schema_field_decode module=export status=skipped error={err}");
                None
            }
        })
        .collect();
    Ok(Some(records))
}
