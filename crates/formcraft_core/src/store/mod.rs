//! Editing state transitions.
//!
//! # Responsibility
//! - `intent`: the closed set of editor actions and their patch payloads.
//! - `reducer`: folds intents over [`crate::model::form::FormState`].
//! - `ids`: unique id source for new fields and options.

pub mod ids;
pub mod intent;
pub mod reducer;
