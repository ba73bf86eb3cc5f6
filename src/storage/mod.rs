//! Key-value persistence for learning data
//!
//! The tracker only needs a string-keyed, string-valued store. Backends:
//! - `MemoryStorage` for tests and ephemeral sessions
//! - `FileStorage` keeping one JSON file per key under the data directory

mod file_storage;
mod memory;

use thiserror::Error;

pub use file_storage::FileStorage;
pub use memory::MemoryStorage;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed, string-valued store.
///
/// Implementations must be usable from a shared reference so one store can
/// back both the tracker and the favorites list.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
