//! In-memory adapter: map-backed implementation of the storage port.
//!
//! Nothing survives the process. Intended for tests and ephemeral use.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::adapters::StorageError;
use crate::ports::KeyValueStore;

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let entries = self.entries.lock().expect("Lock failed");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut entries = self.entries.lock().expect("Lock failed");
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        let mut entries = self.entries.lock().expect("Lock failed");
        entries.remove(key);
        Ok(())
    }
}
