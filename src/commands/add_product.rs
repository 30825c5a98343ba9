use crate::error::Result;
use crate::events::{notify, ProductAddedEvent};
use crate::models::product::{Product, ProductDraft};
use crate::services::product_store::{lock_store, SharedProductStore};
use crate::validation::ProductValidator;
use mediator::{DefaultMediator, Request, RequestHandler};

pub struct AddProductCommand(pub ProductDraft);
impl Request<Result<Product>> for AddProductCommand {}

pub struct AddProductRequestHandler(
    pub SharedProductStore,
    pub ProductValidator,
    pub DefaultMediator,
);
impl RequestHandler<AddProductCommand, Result<Product>> for AddProductRequestHandler {
    fn handle(&mut self, command: AddProductCommand) -> Result<Product> {
        let new_product = self.1.check(command.0).map_err(|violations| {
            log::warn!(
                "Rejected new product with {} violation(s): {}",
                violations.len(),
                violations
            );
            violations
        })?;

        let product = lock_store(&self.0)?.insert(new_product)?;
        notify(&mut self.2, ProductAddedEvent(product.clone()));

        Ok(product)
    }
}
