use crate::models::product::{NewProduct, Product};
use crate::services::product_store::ProductStore;
use std::collections::BTreeMap;

/// Keeps products in process memory. Used when no Redis server is configured
/// and by the tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for MemoryProductStore {
    fn find_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>> {
        Ok(self.products.get(&id).cloned())
    }

    fn find_all(&mut self) -> anyhow::Result<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }

    fn find_where(
        &mut self,
        predicate: &dyn Fn(&Product) -> bool,
    ) -> anyhow::Result<Vec<Product>> {
        Ok(self
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect())
    }

    fn insert(&mut self, product: NewProduct) -> anyhow::Result<Product> {
        self.last_id += 1;
        let product = product.with_id(self.last_id);
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn save(&mut self, product: Product) -> anyhow::Result<Product> {
        self.last_id = self.last_id.max(product.id);
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn delete_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>> {
        Ok(self.products.remove(&id))
    }
}
