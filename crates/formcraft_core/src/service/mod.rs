//! Core use-case services.
//!
//! # Responsibility
//! - Own editing sessions and expose them to UI and CLI collaborators.
//! - Keep collaborators decoupled from reducer and exporter details.

pub mod session;
