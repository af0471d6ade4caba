//! Storage media for the durable key-value layer.
//!
//! A [`StorageBackend`] is a flat string-to-string map with synchronous
//! reads and writes, the same surface a browser's local storage offers.  The
//! on-disk medium is [`Database`](crate::Database); [`MemoryBackend`] keeps
//! everything in-process and can be told to misbehave for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{Result, StoreError};

/// A synchronous string key-value medium.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.  Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// List every stored key, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Handle shared by every durable value of one session.
pub type SharedBackend = Arc<dyn StorageBackend>;

// ---------------------------------------------------------------------------
// In-memory medium
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryInner {
    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory backend disabled".into()));
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// In-process medium.  Optionally enforces a byte quota over the sum of key
/// and value lengths, and can be switched to reject every call.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<MemoryInner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A medium that rejects writes once `limit` bytes are in use.
    pub fn with_quota(limit: usize) -> Self {
        let backend = Self::default();
        backend.lock().quota = Some(limit);
        backend
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Write a raw value, bypassing the quota and availability checks.
    /// Used to plant corrupt data.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().items.insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A panic while holding this lock cannot leave the map half-written,
        // so a poisoned guard is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let inner = self.lock();
        inner.check_available()?;
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.check_available()?;

        if let Some(limit) = inner.quota {
            let size = inner.used_bytes_without(key) + key.len() + value.len();
            if size > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    limit,
                });
            }
        }

        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.check_available()?;
        inner.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let inner = self.lock();
        inner.check_available()?;
        let mut keys: Vec<String> = inner.items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_item("b", "2").unwrap();
        assert_eq!(backend.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.keys().unwrap(), vec!["a", "b"]);

        backend.remove_item("a").unwrap();
        assert!(backend.get_item("a").unwrap().is_none());
        backend.remove_item("missing").unwrap();
    }

    #[test]
    fn quota_counts_replacement_once() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("k", "12345").unwrap();
        // Replacing the same key only counts the new value.
        backend.set_item("k", "123456789").unwrap();

        let err = backend.set_item("x", "12").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("123456789"));
    }

    #[test]
    fn unavailable_rejects_everything() {
        let backend = MemoryBackend::new();
        backend.set_unavailable(true);
        assert!(backend.get_item("a").is_err());
        assert!(backend.set_item("a", "1").is_err());

        backend.set_unavailable(false);
        backend.set_item("a", "1").unwrap();
    }
}
