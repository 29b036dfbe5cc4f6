//! Directory-backed key-value store
//!
//! One file per key (`<dir>/<key>.json`). Writes go to a temporary file in
//! the same directory and are renamed into place while holding an
//! exclusive advisory lock, so concurrent invocations never observe a
//! half-written value.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::{Result, SklogError};

use super::KvStore;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    const LOCK_FILENAME: &'static str = "sklog.lock";

    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|err| {
            SklogError::Storage(format!("create store dir {}: {err}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn lock(&self) -> Result<StoreLock> {
        let path = self.dir.join(Self::LOCK_FILENAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()
            .map_err(|err| SklogError::Storage(format!("lock {}: {err}", path.display())))?;
        Ok(StoreLock { file })
    }
}

/// Releases the advisory lock on drop.
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SklogError::Storage(format!(
                "read {}: {err}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let _lock = self.lock()?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|err| SklogError::Storage(format!("write {}: {err}", path.display())))?;

        trace!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let _lock = self.lock()?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SklogError::Storage(format!(
                "remove {}: {err}",
                path.display()
            ))),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SklogError::Storage(format!("invalid key: {key:?}")));
    }
    Ok(())
}
