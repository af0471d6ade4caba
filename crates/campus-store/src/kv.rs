//! Durable key-value layer.
//!
//! [`load`] and [`save`] move JSON documents between memory and a
//! [`StorageBackend`] and never fail: a broken medium or a corrupt document
//! is logged and treated as "absent" / "not written".
//!
//! [`DurableValue`] caches one such document in memory and follows a
//! one-time hydration protocol.  It starts from a caller-supplied default
//! and refuses to persist anything until [`DurableValue::hydrate`] has run,
//! so an early write of the default can never clobber data saved by a
//! previous session.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{SharedBackend, StorageBackend};

/// Read and decode the document stored under `key`.
///
/// Returns `None` when the key is missing, the stored string is empty, the
/// medium errors, or the document does not decode as `T`.
pub fn load<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Option<T> {
    let raw = match backend.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "storage read failed, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is corrupt, using default");
            None
        }
    }
}

/// Encode `value` and write it under `key`.
///
/// Returns whether the write landed.  Failures are logged, never raised.
pub fn save<T: Serialize + ?Sized>(backend: &dyn StorageBackend, key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize value, write skipped");
            return false;
        }
    };

    match backend.set_item(key, &json) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, bytes = json.len(), error = %e, "storage write failed");
            false
        }
    }
}

/// A single JSON document cached in memory and mirrored to a storage medium.
pub struct DurableValue<T> {
    backend: SharedBackend,
    key: String,
    value: T,
    hydrated: bool,
}

impl<T> DurableValue<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create an unhydrated value holding `initial`.  Nothing is read or
    /// written yet.
    pub fn new(backend: SharedBackend, key: impl Into<String>, initial: T) -> Self {
        Self {
            backend,
            key: key.into(),
            value: initial,
            hydrated: false,
        }
    }

    /// The storage key this value lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `false` until [`hydrate`](Self::hydrate) has run.  Lets callers tell
    /// "not loaded yet" apart from "loaded and genuinely empty".
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The current in-memory value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Load the persisted document over the in-memory value, mark the value
    /// hydrated and write the result back.  Runs once; later calls do nothing.
    ///
    /// When nothing usable is stored, the in-memory value (the default plus
    /// any pre-hydration writes) is kept and becomes the persisted state.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        let loaded = load::<T>(&*self.backend, &self.key);
        let found = loaded.is_some();
        if let Some(value) = loaded {
            self.value = value;
        }
        self.hydrated = true;

        tracing::debug!(key = %self.key, found, "hydrated");

        self.persist();
    }

    /// Replace the value.  Persisted only once hydrated.
    pub fn set(&mut self, next: T) {
        self.value = next;
        self.persist();
    }

    /// Replace the value with a function of the previous one.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next);
    }

    /// Mutate the value in place and persist the whole of it afterwards.
    pub fn modify<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let out = f(&mut self.value);
        self.persist();
        out
    }

    /// Write the current value to the medium if hydrated.  Returns whether a
    /// write landed.
    pub fn persist(&self) -> bool {
        if !self.hydrated {
            return false;
        }
        save(&*self.backend, &self.key, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;

    fn memory() -> (Arc<MemoryBackend>, SharedBackend) {
        let backend = Arc::new(MemoryBackend::new());
        let shared: SharedBackend = backend.clone();
        (backend, shared)
    }

    #[test]
    fn load_tolerates_missing_empty_and_corrupt() {
        let (raw, shared) = memory();
        assert_eq!(load::<Vec<u32>>(&*shared, "k"), None);

        raw.insert_raw("k", "");
        assert_eq!(load::<Vec<u32>>(&*shared, "k"), None);

        raw.insert_raw("k", "{not json");
        assert_eq!(load::<Vec<u32>>(&*shared, "k"), None);

        raw.insert_raw("k", "[1,2]");
        assert_eq!(load::<Vec<u32>>(&*shared, "k"), Some(vec![1, 2]));
    }

    #[test]
    fn load_and_save_swallow_medium_failures() {
        let (raw, shared) = memory();
        raw.set_unavailable(true);
        assert_eq!(load::<Vec<u32>>(&*shared, "k"), None);
        assert!(!save(&*shared, "k", &vec![1u32]));
    }

    #[test]
    fn writes_before_hydration_are_not_persisted() {
        let (raw, shared) = memory();
        raw.insert_raw("k", "[7]");

        let mut value = DurableValue::new(shared, "k", Vec::<u32>::new());
        assert!(!value.is_hydrated());

        value.set(vec![1]);
        assert_eq!(raw.get_item("k").unwrap().as_deref(), Some("[7]"));

        value.hydrate();
        assert!(value.is_hydrated());
        assert_eq!(value.get(), &vec![7]);
    }

    #[test]
    fn hydrate_keeps_default_when_nothing_stored() {
        let (raw, shared) = memory();
        let mut value = DurableValue::new(shared, "k", vec![1u32, 2]);
        value.hydrate();

        assert_eq!(value.get(), &vec![1, 2]);
        assert_eq!(raw.get_item("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn hydrate_runs_once() {
        let (raw, shared) = memory();
        let mut value = DurableValue::new(shared, "k", Vec::<u32>::new());
        value.hydrate();
        value.set(vec![3]);

        raw.insert_raw("k", "[99]");
        value.hydrate();
        assert_eq!(value.get(), &vec![3]);
    }

    #[test]
    fn failed_write_keeps_memory_authoritative() {
        let (raw, shared) = memory();
        let mut value = DurableValue::new(shared, "k", Vec::<u32>::new());
        value.hydrate();

        raw.set_unavailable(true);
        value.update(|prev| {
            let mut next = prev.clone();
            next.push(5);
            next
        });
        assert_eq!(value.get(), &vec![5]);

        raw.set_unavailable(false);
        assert!(value.persist());
        assert_eq!(raw.get_item("k").unwrap().as_deref(), Some("[5]"));
    }
}
