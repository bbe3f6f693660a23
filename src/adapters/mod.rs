//! Adapters layer: concrete implementations of ports.
//!
//! These modules contain the actual integration with storage backends:
//! - `memory`: map-backed store for tests and ephemeral use
//! - `file`: one file per key under a data directory
//! - `sqlite`: SQLite key-value table for durable local storage

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Error type shared by the shipped storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}
