//! Form domain model.
//!
//! # Responsibility
//! - Define the field/form data structures every other module reads.
//! - Keep per-kind attributes in a closed sum type so illegal attribute
//!   combinations cannot be represented.
//!
//! # Invariants
//! - Field ids are unique within one form and never reused.
//! - Field order is render order and export order.

pub mod field;
pub mod form;
pub mod logic;
pub mod rules;
pub mod value;
