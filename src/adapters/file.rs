//! File adapter: one file per key under a data directory.
//!
//! Suited to single-desk installs where the queue should be inspectable
//! and survivable without a database.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::adapters::StorageError;
use crate::ports::KeyValueStore;

/// Directory-backed key-value store.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Resolve the file path for `key`.
    ///
    /// Keys are restricted to a filename-safe alphabet so they cannot
    /// escape the data directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let safe = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !safe {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_delete() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = FileStore::new(dir.path()).expect("Should create store");

        assert!(store.get("queue").expect("Should read").is_none());

        store.set("queue", b"{}").expect("Should write");
        assert_eq!(store.get("queue").expect("Should read"), Some(b"{}".to_vec()));

        store.delete("queue").expect("Should delete");
        assert!(store.get("queue").expect("Should read").is_none());
        store.delete("queue").expect("Should delete again");
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("Should create temp dir");

        {
            let store = FileStore::new(dir.path()).expect("Should create store");
            store.set("queue", b"persisted").expect("Should write");
        }

        let reopened = FileStore::new(dir.path()).expect("Should reopen store");
        assert_eq!(
            reopened.get("queue").expect("Should read"),
            Some(b"persisted".to_vec())
        );
    }

    #[test]
    fn test_unsafe_keys_rejected() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = FileStore::new(dir.path()).expect("Should create store");

        for key in ["", "..", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, b"x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
