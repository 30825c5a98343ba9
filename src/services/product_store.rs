use crate::models::product::{NewProduct, Product};
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedProductStore = Arc<Mutex<dyn ProductStore + Send>>;

/// Durable table of products.
pub trait ProductStore {
    fn find_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>>;

    fn find_all(&mut self) -> anyhow::Result<Vec<Product>>;

    fn find_where(&mut self, predicate: &dyn Fn(&Product) -> bool)
        -> anyhow::Result<Vec<Product>>;

    /// Stores a new product under the next free id.
    fn insert(&mut self, product: NewProduct) -> anyhow::Result<Product>;

    /// Inserts or replaces the product with the same id.
    fn save(&mut self, product: Product) -> anyhow::Result<Product>;

    /// Removes the product, returning it if it existed.
    fn delete_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>>;
}

/// Locks the shared store, turning a poisoned lock into an error.
pub fn lock_store(
    store: &SharedProductStore,
) -> anyhow::Result<MutexGuard<'_, dyn ProductStore + Send + 'static>> {
    store
        .lock()
        .map_err(|_| anyhow::anyhow!("product store lock poisoned"))
}
