use log::warn;

use super::Watchlist;
use crate::constants::WATCHLIST_STORAGE_KEY;
use crate::errors::Result;
use crate::storage::KeyValueStore;

/// Load the persisted watch-list.
///
/// Falls back to [`Watchlist::default_symbols`] when nothing is stored, the
/// store cannot be read, or the stored value is not a list of strings. A
/// stored empty list is honored.
pub fn load_watchlist(store: &dyn KeyValueStore) -> Watchlist {
    let raw = match store.get(WATCHLIST_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Watchlist::default_symbols(),
        Err(e) => {
            warn!("Failed to read watch-list, using defaults: {}", e);
            return Watchlist::default_symbols();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(symbols) => Watchlist::from_symbols(symbols),
        Err(e) => {
            warn!("Stored watch-list is corrupt, using defaults: {}", e);
            Watchlist::default_symbols()
        }
    }
}

/// Persist the watch-list as a JSON array of symbols.
pub fn save_watchlist(store: &dyn KeyValueStore, watchlist: &Watchlist) -> Result<()> {
    let json = serde_json::to_string(watchlist)?;
    store.set(WATCHLIST_STORAGE_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::storage::MemoryKeyValueStore;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("unavailable".into()))
        }
    }

    #[test]
    fn test_absent_uses_defaults() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(load_watchlist(&store), Watchlist::default_symbols());
    }

    #[test]
    fn test_corrupt_uses_defaults() {
        for raw in ["not json", r#"{"a": 1}"#, "[1, 2]", r#"["AAPL""#] {
            let store = MemoryKeyValueStore::with_entry(WATCHLIST_STORAGE_KEY, raw);
            assert_eq!(load_watchlist(&store), Watchlist::default_symbols(), "{}", raw);
        }
    }

    #[test]
    fn test_unreadable_store_uses_defaults() {
        assert_eq!(load_watchlist(&FailingStore), Watchlist::default_symbols());
    }

    #[test]
    fn test_empty_list_is_honored() {
        let store = MemoryKeyValueStore::with_entry(WATCHLIST_STORAGE_KEY, "[]");
        assert!(load_watchlist(&store).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryKeyValueStore::new();
        let watchlist = Watchlist::from_symbols(["NVDA", "AMD"]);
        save_watchlist(&store, &watchlist).unwrap();

        assert_eq!(
            store.get(WATCHLIST_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["NVDA","AMD"]"#)
        );
        assert_eq!(load_watchlist(&store), watchlist);
    }

    #[test]
    fn test_save_propagates_store_errors() {
        let result = save_watchlist(&FailingStore, &Watchlist::default_symbols());
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
