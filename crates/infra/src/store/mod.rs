//! Document storage abstractions.

pub mod document_store;

use std::sync::Arc;

use storefront_auth::User;
use storefront_orders::Order;
use storefront_products::Product;

pub use document_store::{DocumentStore, InMemoryDocumentStore, StoreError};

/// The three collections the application works with.
///
/// Owned by the process and handed to the HTTP layer explicitly; there is no
/// global instance.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DocumentStore<User>>,
    pub products: Arc<dyn DocumentStore<Product>>,
    pub orders: Arc<dyn DocumentStore<Order>>,
}

impl Stores {
    /// Empty in-memory collections (dev/test).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryDocumentStore::new()),
            products: Arc::new(InMemoryDocumentStore::new()),
            orders: Arc::new(InMemoryDocumentStore::new()),
        }
    }
}

impl core::fmt::Debug for Stores {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
