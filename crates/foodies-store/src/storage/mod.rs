//! # Storage Substrate
//!
//! The durable, string-keyed key-value storage both stores persist to, and
//! the adapter that is the only code allowed to call it.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartStore / UserStore                                                │
//! │        │  load(key, fallback)      save(key, &value)                   │
//! │        ▼                                                                │
//! │   Adapter (this module)   JSON encode/decode, never fails outward      │
//! │        │  get_item / set_item / remove_item                            │
//! │        ▼                                                                │
//! │   Storage trait           MemoryStorage | FileStorage                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed read returns the fallback. A failed write is logged and dropped;
//! the store's in-memory state stays authoritative for the rest of the
//! process.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StorageResult;

// =============================================================================
// Storage Trait
// =============================================================================

/// A synchronous, string-keyed durable store.
///
/// Implementations use interior mutability so a store can hold a shared
/// handle. Two handles onto the same backing data behave like two tabs on
/// one origin: each sees the other's writes only when it reads again.
pub trait Storage: Send + Sync {
    /// Returns the raw value for `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Reads and decodes the JSON value under `key`.
///
/// Returns `fallback()` when the key is absent, unreadable, or holds
/// something that does not decode as `T`.
pub fn load<T, S, F>(storage: &S, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
    F: FnOnce() -> T,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored value, using fallback");
            return fallback();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value, using fallback");
            return fallback();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Stored value is malformed, using fallback");
            fallback()
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`.
///
/// Returns whether the write landed. Callers are free to ignore it.
pub fn save<T, S>(storage: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Failed to encode value, write dropped");
            return false;
        }
    };
    save_text(storage, key, &raw)
}

/// Reads the raw string under `key` without decoding it.
pub fn load_text<S: Storage + ?Sized>(storage: &S, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value");
            None
        }
    }
}

/// Writes a raw string under `key`.
pub fn save_text<S: Storage + ?Sized>(storage: &S, key: &str, value: &str) -> bool {
    match storage.set_item(key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist value, keeping in-memory state");
            false
        }
    }
}

/// Deletes `key`.
pub fn remove<S: Storage + ?Sized>(storage: &S, key: &str) -> bool {
    match storage.remove_item(key) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to remove stored value");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_uses_fallback() {
        let storage = MemoryStorage::new();
        let value: Vec<u32> = load(&storage, "missing", || vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_load_malformed_uses_fallback() {
        let storage = MemoryStorage::new();
        storage.set_item("nums", "{not json").unwrap();
        let value: Vec<u32> = load(&storage, "nums", Vec::new);
        assert!(value.is_empty());

        // right JSON, wrong shape
        storage.set_item("nums", r#"{"a": 1}"#).unwrap();
        let value: Vec<u32> = load(&storage, "nums", Vec::new);
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        assert!(save(&storage, "nums", &vec![1, 2, 3]));
        let value: Vec<u32> = load(&storage, "nums", Vec::new);
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejected_write_is_swallowed() {
        let storage = MemoryStorage::new();
        save(&storage, "nums", &vec![1]);

        storage.set_fail_writes(true);
        assert!(!save(&storage, "nums", &vec![2]));
        assert!(!remove(&storage, "nums"));

        let value: Vec<u32> = load(&storage, "nums", Vec::new);
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn test_text_values_are_not_json_encoded() {
        let storage = MemoryStorage::new();
        save_text(&storage, "currentUserId", "abc-123");
        assert_eq!(
            storage.get_item("currentUserId").unwrap().as_deref(),
            Some("abc-123")
        );
        assert_eq!(load_text(&storage, "currentUserId").as_deref(), Some("abc-123"));

        assert!(remove(&storage, "currentUserId"));
        assert_eq!(load_text(&storage, "currentUserId"), None);
    }
}
