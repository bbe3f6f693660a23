//! Storage port: keyed blob persistence for the triage queue.
//!
//! This trait abstracts the storage backend from the application logic.
//! The queue is persisted wholesale under a single fixed key, so the
//! port only needs get/set/delete.

/// Trait for string-keyed blob storage.
pub trait KeyValueStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `None` if the key has never been written or was deleted.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Delete the value under `key`.
    ///
    /// Deleting a key that does not exist is not an error.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;
}
