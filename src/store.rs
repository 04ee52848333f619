//! Answer storage backends
//!
//! The autosave controller talks to an injected key-value store, so the
//! core logic runs against an in-memory map in tests and against the
//! browser's LocalStorage in the shipped wasm module.

use std::cell::RefCell;
use std::collections::HashMap;

/// String key-value store holding the serialized answer set.
///
/// The interface is infallible: a backend that cannot persist (no
/// window, storage disabled) degrades to dropping writes and returning
/// nothing, matching how the page behaves with storage blocked.
pub trait AnswerStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Write (or overwrite) the value stored under `key`
    fn set(&self, key: &str, value: &str);
    /// Delete the value stored under `key`
    fn remove(&self, key: &str);
}

/// Browser LocalStorage, scoped to the page's origin (WASM only).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl AnswerStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
impl AnswerStore for LocalStorageStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {
        // No-op for native
    }

    fn remove(&self, _key: &str) {
        // No-op for native
    }
}

/// In-memory store for tests and the native smoke run.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnswerStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_then_get() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_owned()));
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("k", "first");
        store.set("k", "second");
        assert_eq!(store.get("k"), Some("second".to_owned()));
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.set("k", "v");
        store.remove("k");
        assert_eq!(store.get("k"), None);

        // Removing an absent key is fine
        store.remove("k");
    }
}
