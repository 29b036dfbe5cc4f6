use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::core::categories::DEFAULT_CATEGORIES;
use crate::core::clock::FixedClock;
use crate::core::controller::Controller;
use crate::core::skill::ImportItem;
use crate::storage::FileStore;

/// Test fixture providing an isolated data root.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    /// # Panics
    /// When the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    ///
    /// # Panics
    /// When the file cannot be written.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write an import document (JSON array of items).
    ///
    /// # Panics
    /// When the items cannot be serialized or written.
    #[must_use]
    pub fn create_import(&self, name: &str, items: &[ImportItem]) -> PathBuf {
        let payload = serde_json::to_string_pretty(items).expect("serialize import items");
        self.create_file(name, &payload)
    }

    /// Controller over a file store in this fixture, at a fixed instant.
    ///
    /// # Panics
    /// When the store directory cannot be created.
    #[must_use]
    pub fn controller(&self, now: DateTime<Utc>) -> (Controller<FileStore>, FixedClock) {
        let clock = FixedClock::new(now);
        let store = FileStore::open(self.data_path.join("store")).expect("open file store");
        let defaults = DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect();
        (Controller::open(store, Box::new(clock.clone()), defaults), clock)
    }
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}
