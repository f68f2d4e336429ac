//! Core domain logic for Formcraft.
//! This crate is the single source of truth for form-editing invariants.

pub mod config;
pub mod eval;
pub mod export;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;

pub use config::{ConfigError, ExportConfig, FormcraftConfig};
pub use eval::preview::{condition_sources, submission_payload, validate_form, FormErrors};
pub use eval::validate::validate;
pub use eval::visibility::{is_visible, FormValues};
pub use export::document::to_document;
pub use export::file_name::{export_file_name, ExportFormat};
pub use export::schema::{
    fields_from_schema, parse_schema, schema_to_json, to_schema, to_schema_at, SchemaDocument,
    SchemaError, SchemaField, SchemaMeta,
};
pub use logging::{
    default_log_level, init_logging, logging_status, LogSettings, LoggingError, LoggingStatus,
};
pub use model::field::{
    Control, Field, FieldBody, FieldId, FieldKind, FieldKindError, FieldOption, FieldPatch,
    HeadingLevel, OptionPatch,
};
pub use model::form::{EditorTab, FormMeta, FormState, MetaPatch};
pub use model::logic::{
    Condition, ConditionOperator, ConditionPatch, ConditionalLogic, LogicAction, LogicPatch,
    LogicType,
};
pub use model::rules::{ValidationPatch, ValidationRules};
pub use model::value::FieldValue;
pub use registry::field_types::{FieldCategory, FieldTypeDescriptor};
pub use registry::validation_rules::{RuleDescriptor, RuleKey};
pub use service::session::FormSession;
pub use store::ids::{IdSource, SessionIdSource};
pub use store::intent::Intent;
pub use store::reducer::FormReducer;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
