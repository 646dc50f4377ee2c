//! Key-value persistence for carts, addresses and favorites.
//!
//! Records are stored as JSON under namespaced keys such as
//! `address:<user>:<id>`. The hosted database the mobile app syncs with is
//! reached through whatever [`KvStore`] the caller plugs in; this crate ships
//! an in-memory store and a single-file JSON store.
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::store::{KvStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("cart:user-1", &vec!["item-1"]).unwrap();
//! let items: Option<Vec<String>> = store.get("cart:user-1").unwrap();
//! assert_eq!(items, Some(vec!["item-1".to_string()]));
//! ```

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::error::CommerceError;
use serde::{de::DeserializeOwned, Serialize};

/// Byte-level key-value store with typed JSON helpers.
pub trait KvStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CommerceError>;

    fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CommerceError>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool, CommerceError>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CommerceError>;

    fn exists(&self, key: &str) -> Result<bool, CommerceError> {
        Ok(self.get_raw(key)?.is_some())
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CommerceError>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CommerceError>
    where
        Self: Sized,
    {
        self.set_raw(key, serde_json::to_vec(value)?)
    }

    /// Every value stored under `prefix`.
    fn scan<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, CommerceError>
    where
        Self: Sized,
    {
        let mut values = Vec::new();
        for key in self.keys_with_prefix(prefix)? {
            if let Some(value) = self.get(&key)? {
                values.push(value);
            }
        }
        Ok(values)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CommerceError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CommerceError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool, CommerceError> {
        (**self).delete(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CommerceError> {
        (**self).keys_with_prefix(prefix)
    }
}

/// Build a namespaced store key.
///
/// ```rust
/// use storefront_commerce::store_key;
/// assert_eq!(store_key!("address", "user-1", "a1"), "address:user-1:a1");
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
