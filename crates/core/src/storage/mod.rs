//! Client-local key-value storage.
//!
//! The dashboard persists a handful of string values under fixed keys, the
//! way a browser client would use local storage. [`FileKeyValueStore`] keeps
//! them in one JSON file; [`MemoryKeyValueStore`] is the in-process variant.

mod file_store;
mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;

use crate::errors::Result;

/// String values stored under string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
