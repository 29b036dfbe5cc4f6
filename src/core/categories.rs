//! Category set: configured defaults plus user-added custom names.
//!
//! Skills reference categories by name only, so nothing here is pruned
//! when the last skill using a category goes away.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::storage::{self, KvStore, keys};

use super::skill::require_text;

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Frontend",
    "Backend",
    "Mobile",
    "Database",
    "DevOps",
    "Cloud",
    "Testing",
    "Soft Skills",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySet {
    defaults: Vec<String>,
    custom: Vec<String>,
}

impl CategorySet {
    #[must_use]
    pub const fn new(defaults: Vec<String>, custom: Vec<String>) -> Self {
        Self { defaults, custom }
    }

    /// Load the custom list from the store; malformed content yields an
    /// empty list.
    pub fn load<S: KvStore + ?Sized>(store: &S, defaults: Vec<String>) -> Self {
        let custom: Vec<String> = storage::load_json_or_default(store, keys::CUSTOM_CATEGORIES);
        Self::new(defaults, custom)
    }

    #[must_use]
    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    #[must_use]
    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Defaults first, then custom categories in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.defaults
            .iter()
            .chain(self.custom.iter())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.all().any(|existing| existing == name)
    }

    /// Add a custom category. Returns the trimmed name and whether it was
    /// new. Adding a known name is a no-op.
    pub fn add(&mut self, name: &str) -> Result<(String, bool)> {
        require_text(name, "category name")?;
        let trimmed = name.trim().to_string();
        if self.contains(&trimmed) {
            debug!(category = %trimmed, "category already known");
            return Ok((trimmed, false));
        }
        self.custom.push(trimmed.clone());
        Ok((trimmed, true))
    }

    pub fn persist<S: KvStore + ?Sized>(&self, store: &mut S) {
        storage::persist_json(store, keys::CUSTOM_CATEGORIES, &self.custom);
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
            Vec::new(),
        )
    }
}
