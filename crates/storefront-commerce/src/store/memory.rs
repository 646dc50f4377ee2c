use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::CommerceError;
use crate::store::KvStore;

/// In-process store. Used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CommerceError {
    CommerceError::StorageError("memory store lock poisoned".to_string())
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CommerceError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CommerceError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, CommerceError> {
        Ok(self.entries.write().map_err(poisoned)?.remove(key).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CommerceError> {
        Ok(self
            .entries
            .read()
            .map_err(poisoned)?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_round_trip_and_delete() {
        let store = MemoryStore::new();
        store.set("fav:u1:p1", &"Silver Ring").unwrap();
        assert!(store.exists("fav:u1:p1").unwrap());

        let title: Option<String> = store.get("fav:u1:p1").unwrap();
        assert_eq!(title.as_deref(), Some("Silver Ring"));

        assert!(store.delete("fav:u1:p1").unwrap());
        assert!(!store.delete("fav:u1:p1").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_prefix_scan_is_bounded() {
        let store = MemoryStore::new();
        store.set("address:u1:a", &1).unwrap();
        store.set("address:u1:b", &2).unwrap();
        store.set("address:u10:c", &3).unwrap();
        store.set("cart:u1", &4).unwrap();

        let keys = store.keys_with_prefix("address:u1:").unwrap();
        assert_eq!(keys, vec!["address:u1:a", "address:u1:b"]);

        let values: Vec<i32> = store.scan("address:u1:").unwrap();
        assert_eq!(values, vec![1, 2]);
    }
}
