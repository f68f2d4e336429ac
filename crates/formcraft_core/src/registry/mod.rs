//! Static catalogs consumed by the editor and the reducer.
//!
//! # Responsibility
//! - `field_types`: available field kinds, palette metadata and defaults.
//! - `validation_rules`: validation rules and the kinds they apply to.

pub mod field_types;
pub mod validation_rules;
