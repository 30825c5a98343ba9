use crate::error::{ProductError, Result};
use crate::events::{notify, ProductDeletedEvent};
use crate::models::product::Product;
use crate::services::product_store::{lock_store, SharedProductStore};
use mediator::{DefaultMediator, Request, RequestHandler};

pub struct DeleteProductCommand(pub i64);
impl Request<Result<Product>> for DeleteProductCommand {}

pub struct DeleteProductRequestHandler(pub SharedProductStore, pub DefaultMediator);
impl RequestHandler<DeleteProductCommand, Result<Product>> for DeleteProductRequestHandler {
    fn handle(&mut self, command: DeleteProductCommand) -> Result<Product> {
        let deleted = lock_store(&self.0)?
            .delete_by_id(command.0)?
            .ok_or(ProductError::NotFound(command.0))?;

        notify(&mut self.1, ProductDeletedEvent(deleted.clone()));
        Ok(deleted)
    }
}
