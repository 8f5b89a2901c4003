use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use storefront_core::Entity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

/// Keyed document collection.
///
/// Each call is atomic on its own; there are no multi-call transactions.
pub trait DocumentStore<V: Entity>: Send + Sync {
    fn find(&self, id: &V::Id) -> Result<Option<V>, StoreError>;

    /// All documents, oldest id first.
    fn list(&self) -> Result<Vec<V>, StoreError>;

    /// Insert or replace the document with the same id.
    fn save(&self, value: V) -> Result<(), StoreError>;

    /// Remove and return the document; `None` when it did not exist.
    fn delete(&self, id: &V::Id) -> Result<Option<V>, StoreError>;
}

impl<V, S> DocumentStore<V> for Arc<S>
where
    V: Entity,
    S: DocumentStore<V> + ?Sized,
{
    fn find(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).find(id)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn save(&self, value: V) -> Result<(), StoreError> {
        (**self).save(value)
    }

    fn delete(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).delete(id)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryDocumentStore<V: Entity> {
    inner: RwLock<BTreeMap<V::Id, V>>,
}

impl<V: Entity> InMemoryDocumentStore<V>
where
    V::Id: Ord,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<V: Entity> Default for InMemoryDocumentStore<V>
where
    V::Id: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl<V> DocumentStore<V> for InMemoryDocumentStore<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Ord + Send + Sync,
{
    fn find(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn save(&self, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(value.id().clone(), value);
        Ok(())
    }

    fn delete(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;
    use storefront_products::{Product, ProductInput};

    fn product(name: &str) -> Product {
        ProductInput {
            name: Some(name.to_string()),
            price: Some(1.0),
            ..Default::default()
        }
        .into_product()
        .unwrap()
    }

    #[test]
    fn save_find_delete() {
        let store: InMemoryDocumentStore<Product> = InMemoryDocumentStore::new();
        let p = product("Lamp");
        store.save(p.clone()).unwrap();

        assert_eq!(store.find(&p.id).unwrap(), Some(p.clone()));
        assert_eq!(store.delete(&p.id).unwrap(), Some(p.clone()));
        assert_eq!(store.delete(&p.id).unwrap(), None);
        assert_eq!(store.find(&p.id).unwrap(), None);
    }

    #[test]
    fn save_replaces_same_id() {
        let store: InMemoryDocumentStore<Product> = InMemoryDocumentStore::new();
        let p = product("Lamp");
        store.save(p.clone()).unwrap();
        store
            .save(Product {
                name: "Desk lamp".to_string(),
                ..p.clone()
            })
            .unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Desk lamp");
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store: InMemoryDocumentStore<Product> = InMemoryDocumentStore::new();
        let first = product("First");
        let second = product("Second");
        store.save(second.clone()).unwrap();
        store.save(first.clone()).unwrap();

        let ids: Vec<ProductId> = store.list().unwrap().into_iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
