use crate::models::product::{NewProduct, Product};
use crate::services::product_store::ProductStore;
use redis::{Client, Commands, RedisError};

/// Stores each product as a JSON value under `<base_key>:<id>` and keeps the
/// id sequence under `<base_key>-sequence`.
#[derive(Debug, Clone)]
pub struct RedisProductStore {
    client: Client,
    base_key: String,
}

impl RedisProductStore {
    pub fn new<S: Into<String>>(client: Client, key: S) -> Self {
        let base_key = key.into();
        Self { client, base_key }
    }

    fn product_key(&self, id: i64) -> String {
        format!("{}:{}", self.base_key, id)
    }

    fn sequence_key(&self) -> String {
        format!("{}-sequence", self.base_key)
    }

    fn to_json(product: &Product) -> Result<String, RedisError> {
        serde_json::to_string(product).map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "Failed to serialize product",
                e.to_string(),
            ))
        })
    }

    fn from_json(json: &str) -> Result<Product, RedisError> {
        serde_json::from_str(json).map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "Failed to deserialize product",
                e.to_string(),
            ))
        })
    }
}

impl ProductStore for RedisProductStore {
    fn find_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>> {
        let key = self.product_key(id);
        let json: Option<String> = self.client.get(key)?;

        match json {
            Some(json) => Ok(Some(Self::from_json(&json)?)),
            None => Ok(None),
        }
    }

    fn find_all(&mut self) -> anyhow::Result<Vec<Product>> {
        let pattern = format!("{}:*", self.base_key);
        let iter: redis::Iter<String> = self.client.scan_match(pattern)?;
        let keys = iter.collect::<Vec<String>>();

        let mut products = Vec::with_capacity(keys.len());
        for key in keys {
            let json: Option<String> = self.client.get(key)?;
            // Deleted between the scan and the read.
            if let Some(json) = json {
                products.push(Self::from_json(&json)?);
            }
        }

        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    fn find_where(
        &mut self,
        predicate: &dyn Fn(&Product) -> bool,
    ) -> anyhow::Result<Vec<Product>> {
        let mut products = self.find_all()?;
        products.retain(|p| predicate(p));
        Ok(products)
    }

    fn insert(&mut self, product: NewProduct) -> anyhow::Result<Product> {
        let sequence_key = self.sequence_key();
        let id: i64 = self.client.incr(sequence_key, 1)?;
        self.save(product.with_id(id))
    }

    fn save(&mut self, product: Product) -> anyhow::Result<Product> {
        let json = Self::to_json(&product)?;
        let key = self.product_key(product.id);
        let _: () = self.client.set(key, json)?;
        Ok(product)
    }

    fn delete_by_id(&mut self, id: i64) -> anyhow::Result<Option<Product>> {
        let existing = self.find_by_id(id)?;
        if existing.is_some() {
            let key = self.product_key(id);
            let _: () = self.client.del(key)?;
        }
        Ok(existing)
    }
}
