//! Key-value persistence for tokens.
//!
//! A store maps string keys to string values; tokens are laid out over it by
//! [`layout::StoreKeys`].

pub mod file;
pub mod layout;
pub mod memory;

use anyhow::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// One pending write in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Set { key: String, value: String },
    Remove { key: String },
}

impl Change {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Change::Set { key: key.into(), value: value.into() }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Change::Remove { key: key.into() }
    }
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Apply a batch of changes.
    ///
    /// The default applies them one by one and stops at the first error.
    /// Stores that persist as a unit override it to write all or nothing.
    fn apply(&mut self, changes: &[Change]) -> Result<()> {
        for change in changes {
            match change {
                Change::Set { key, value } => self.set(key, value)?,
                Change::Remove { key } => self.remove(key)?,
            }
        }
        Ok(())
    }
}
