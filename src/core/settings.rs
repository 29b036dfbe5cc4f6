//! Persisted user preferences.

use serde::Serialize;

use crate::storage::{KvStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Settings {
    pub dark_mode: bool,
}

impl Settings {
    /// Anything other than the literal `"true"` reads as off.
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let dark_mode = matches!(
            store.get(keys::DARK_MODE),
            Ok(Some(ref value)) if value.trim() == "true"
        );
        Self { dark_mode }
    }

    pub fn persist<S: KvStore + ?Sized>(&self, store: &mut S) {
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(err) = store.set(keys::DARK_MODE, value) {
            tracing::warn!(error = %err, "failed to persist dark mode preference");
        }
    }
}
