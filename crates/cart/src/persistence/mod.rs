//! Durable key-value storage for the serialized cart.

pub mod file;
pub mod memory;

pub use file::FilePersistence;
pub use memory::InMemoryPersistence;

use thiserror::Error;

/// Errors raised by a persistence store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Blob storage keyed by string, surviving process restarts.
///
/// Calls are synchronous: a write has completed (or failed) when it returns.
pub trait PersistenceStore: Send + Sync {
    /// Reads the blob stored under `key`, `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the blob stored under `key`.
    fn write(&self, key: &str, blob: &str) -> Result<(), PersistenceError>;
}
