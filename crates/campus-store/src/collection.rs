//! Entity stores: one durable document per entity kind.
//!
//! Each [`EntityStore`] owns the whole collection for its key.  Every change
//! goes through [`replace`](EntityStore::replace) or one of the updater
//! forms and persists the full collection; there are no partial writes.

use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::SharedBackend;
use crate::kv::DurableValue;
use crate::models::{Chat, Product, PurchaseRequest, User};

/// A named, durably persisted collection.
pub struct EntityStore<T> {
    name: &'static str,
    value: DurableValue<T>,
}

impl<T> EntityStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(name: &'static str, backend: SharedBackend, key: &str, initial: T) -> Self {
        Self {
            name,
            value: DurableValue::new(backend, key, initial),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &str {
        self.value.key()
    }

    pub fn is_hydrated(&self) -> bool {
        self.value.is_hydrated()
    }

    pub fn hydrate(&mut self) {
        self.value.hydrate();
    }

    /// The current collection.
    pub fn read(&self) -> &T {
        self.value.get()
    }

    /// Swap in a whole new collection.
    pub fn replace(&mut self, next: T) {
        tracing::debug!(store = self.name, "replace");
        self.value.set(next);
    }

    /// Compute the next collection from the previous one.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        tracing::debug!(store = self.name, "update");
        self.value.update(f);
    }

    /// Edit the collection in place, then persist all of it.
    pub fn modify<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        tracing::debug!(store = self.name, "modify");
        self.value.modify(f)
    }
}

pub type ProductStore = EntityStore<Vec<Product>>;
pub type ChatStore = EntityStore<Vec<Chat>>;
pub type UserStore = EntityStore<Option<User>>;
pub type FavoriteStore = EntityStore<Favorites>;
pub type PurchaseRequestStore = EntityStore<Vec<PurchaseRequest>>;

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favorited product ids.  A set that remembers insertion order and
/// persists as a plain JSON array; duplicates in stored data collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(IndexSet<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.0.contains(product_id)
    }

    /// Flip membership of `product_id`.  Returns `true` if it is now a
    /// favorite.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.0.shift_remove(product_id) {
            false
        } else {
            self.0.insert(product_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in the order they were first favorited.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::{MemoryBackend, StorageBackend};

    #[test]
    fn toggle_flips_and_keeps_order() {
        let mut favs: Favorites = ["a", "b", "c"].into_iter().collect();

        assert!(!favs.toggle("b"));
        assert!(favs.toggle("d"));
        assert!(favs.toggle("b"));
        assert_eq!(favs.iter().collect::<Vec<_>>(), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn favorites_persist_as_array_and_dedupe() {
        let json = serde_json::to_string(&["x", "y"].into_iter().collect::<Favorites>()).unwrap();
        assert_eq!(json, r#"["x","y"]"#);

        let favs: Favorites = serde_json::from_str(r#"["x","y","x"]"#).unwrap();
        assert_eq!(favs.len(), 2);
    }

    #[test]
    fn every_change_writes_the_whole_collection() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store: EntityStore<Vec<u32>> =
            EntityStore::new("numbers", backend.clone(), "numbers-store", Vec::new());
        store.hydrate();

        store.replace(vec![1, 2]);
        store.update(|prev| prev.iter().map(|n| n * 10).collect());
        let len = store.modify(|v| {
            v.insert(0, 5);
            v.len()
        });

        assert_eq!(len, 3);
        assert_eq!(store.read(), &vec![5, 10, 20]);
        assert_eq!(
            backend.get_item("numbers-store").unwrap().as_deref(),
            Some("[5,10,20]")
        );
    }
}
