//! # Persistence
//!
//! Everything a diner leaves behind between sessions goes through a [`KeyValueStore`]: a flat
//! map of string keys to JSON strings. [`MemoryStore`] backs tests; [`FileStore`] keeps one file
//! per key in a data directory.
//!
//! [`UserRecords`] sits on top and knows the key layout:
//!
//! | Key | Value |
//! |---|---|
//! | `userData_<email>` | the diner's [`UserRecord`] as camelCase JSON |
//! | `loggedInUserEmail` | email of the session's user |
//! | `loggedInUserName` | display name |
//! | `loggedInUserRole` | `user` or `admin` |

mod file;
mod memory;
mod records;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::*;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// A synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}
