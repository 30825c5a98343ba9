use crate::error::{ProductError, Result};
use crate::events::{notify, ProductUpdatedEvent};
use crate::models::product::{Product, ProductDraft};
use crate::services::product_store::{lock_store, SharedProductStore};
use crate::validation::ProductValidator;
use mediator::{DefaultMediator, Request, RequestHandler};

/// Replaces every mutable field of an existing product.
pub struct UpdateProductCommand {
    pub id: i64,
    pub product: ProductDraft,
}

impl Request<Result<Product>> for UpdateProductCommand {}

pub struct UpdateProductRequestHandler(
    pub SharedProductStore,
    pub ProductValidator,
    pub DefaultMediator,
);
impl RequestHandler<UpdateProductCommand, Result<Product>> for UpdateProductRequestHandler {
    fn handle(&mut self, command: UpdateProductCommand) -> Result<Product> {
        let mut store = lock_store(&self.0)?;

        if store.find_by_id(command.id)?.is_none() {
            return Err(ProductError::NotFound(command.id));
        }

        let replacement = self.1.check(command.product).map_err(|violations| {
            log::warn!("Rejected update of product {}: {}", command.id, violations);
            violations
        })?;

        let product = store.save(replacement.with_id(command.id))?;
        notify(&mut self.2, ProductUpdatedEvent(product.clone()));

        Ok(product)
    }
}
