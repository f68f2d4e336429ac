//! Unique-id source for fields and options.
//!
//! # Invariants
//! - Ids produced by one source are never repeated within a session.
//! - Field ids start with `field_`, option values with `option_`.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Generator of session-unique identifiers.
pub trait IdSource {
    /// Returns a fresh field id.
    fn next_field_id(&mut self) -> String;
    /// Returns a fresh option value.
    fn next_option_value(&mut self) -> String;
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Default source: process-wide counter plus a random suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionIdSource;

impl SessionIdSource {
    pub fn new() -> Self {
        Self
    }

    fn next(prefix: &str) -> String {
        let sequence = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{prefix}_{sequence}_{}", &suffix[..9])
    }
}

impl IdSource for SessionIdSource {
    fn next_field_id(&mut self) -> String {
        Self::next("field")
    }

    fn next_option_value(&mut self) -> String {
        Self::next("option")
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_field_id(&mut self) -> String {
        (**self).next_field_id()
    }

    fn next_option_value(&mut self) -> String {
        (**self).next_option_value()
    }
}

#[cfg(test)]
mod tests {
    use super::{IdSource, SessionIdSource};
    use std::collections::HashSet;

    #[test]
    fn session_ids_are_unique_and_prefixed() {
        let mut ids = SessionIdSource::new();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let id = ids.next_field_id();
            assert!(id.starts_with("field_"));
            assert!(seen.insert(id));
        }
        assert!(ids.next_option_value().starts_with("option_"));
    }
}
