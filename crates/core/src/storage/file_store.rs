use std::{collections::BTreeMap, fs, path::PathBuf, sync::Mutex};

use log::warn;
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::errors::{Error, Result};

const CURRENT_VERSION: u32 = 1;

/// [`KeyValueStore`] backed by a single pretty-printed JSON file.
///
/// The whole file is read and rewritten on every operation; the store holds a
/// few short values, so there is no in-memory cache.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize, Default)]
struct StoredEntries {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn with_store<F>(&self, mut op: F) -> Result<()>
    where
        F: FnMut(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("File store lock poisoned".into()))?;

        // Unparsable JSON is replaced; a newer version or an I/O failure is not.
        let mut entries = match self.load_entries_locked() {
            Ok(entries) => entries,
            Err(Error::Json(e)) => {
                warn!("Discarding unreadable store {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        op(&mut entries);
        self.persist_entries_locked(entries)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("File store lock poisoned".into()))?;
        self.load_entries_locked()
    }

    fn load_entries_locked(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.is_empty() {
            return Ok(BTreeMap::new());
        }

        let stored: StoredEntries = serde_json::from_slice(&raw)?;
        if stored.version > CURRENT_VERSION {
            return Err(Error::Storage(format!(
                "Store version {} is newer than supported version {}",
                stored.version, CURRENT_VERSION
            )));
        }
        Ok(stored.entries)
    }

    fn persist_entries_locked(&self, entries: BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredEntries {
            version: CURRENT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_store(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }
}
