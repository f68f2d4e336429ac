//! Exporters turning a form into portable text.
//!
//! # Responsibility
//! - `schema`: minimal JSON schema, plus decoding it back.
//! - `document`: standalone HTML page.
//! - `file_name`: suggested download names.
//!
//! # See also
//! - `crate::service::session` for the session-level entry points.

pub mod document;
pub mod file_name;
pub mod schema;
