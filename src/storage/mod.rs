//! Storage layer for sklog
//!
//! All persisted state lives in a flat key-value store. Values are text,
//! usually JSON. The core never touches the medium directly, only the
//! [`KvStore`] trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Result, SklogError};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Well-known keys.
pub mod keys {
    pub const SKILLS: &str = "skills";
    pub const CUSTOM_CATEGORIES: &str = "customCategories";
    pub const DARK_MODE: &str = "darkMode";
    pub const LEARNING_STREAK: &str = "learningStreak";
    pub const DAILY_CHALLENGES: &str = "dailyChallenges";
    pub const USER_POINTS: &str = "userPoints";
    pub const CHALLENGES_LAST_RESET: &str = "challengesLastReset";

    pub const ALL: [&str; 7] = [
        SKILLS,
        CUSTOM_CATEGORIES,
        DARK_MODE,
        LEARNING_STREAK,
        DAILY_CHALLENGES,
        USER_POINTS,
        CHALLENGES_LAST_RESET,
    ];
}

/// Opaque key-value store, one entry per key.
pub trait KvStore {
    /// Read a key. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Read and decode a JSON value, falling back to `T::default()` when the
/// key is missing, unreadable, or malformed.
pub fn load_json_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "failed to read stored value, using default");
            return T::default();
        }
    };
    if raw.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "malformed stored value, using default");
            T::default()
        }
    }
}

/// Encode and write a JSON value.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let payload = serde_json::to_string(value)
        .map_err(|err| SklogError::Serialization(format!("{key}: {err}")))?;
    store.set(key, &payload)
}

/// Write a JSON value, logging instead of failing. Persistence errors never
/// abort a mutation; the in-memory state stays authoritative.
pub fn persist_json<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    if let Err(err) = save_json(store, key, value) {
        warn!(key, error = %err, "failed to persist value; in-memory state kept");
    }
}
