//! Runtime evaluators over a field list and the values entered for it.
//!
//! # Responsibility
//! - `validate`: one field, one value.
//! - `visibility`: conditional show/hide.
//! - `preview`: whole-form validation, submission payload and condition
//!   source listing.
//!
//! # Invariants
//! - Evaluators are pure and never fail; problems are reported as values.

pub mod preview;
pub mod validate;
pub mod visibility;
