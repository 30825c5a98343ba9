use crate::error::{ProductError, Result};
use crate::events::{notify, ProductUpdatedEvent};
use crate::models::patch::ProductPatch;
use crate::models::product::{Product, ProductDraft};
use crate::services::product_store::{lock_store, SharedProductStore};
use crate::validation::ProductValidator;
use mediator::{DefaultMediator, Request, RequestHandler};

/// Overwrites only the fields named in the patch.
pub struct PatchProductCommand {
    pub id: i64,
    pub patch: ProductPatch,
}

impl Request<Result<Product>> for PatchProductCommand {}

/// Applies `patch` to a copy of `existing` and validates the whole result,
/// so a field the patch leaves alone can still fail the update.
pub fn merge_partial(
    existing: &Product,
    patch: ProductPatch,
    validator: &ProductValidator,
) -> Result<Product> {
    let mut draft = ProductDraft::from(existing.clone());
    patch.apply_to(&mut draft)?;

    let merged = validator.check(draft)?;
    Ok(merged.with_id(existing.id))
}

pub struct PatchProductRequestHandler(
    pub SharedProductStore,
    pub ProductValidator,
    pub DefaultMediator,
);
impl RequestHandler<PatchProductCommand, Result<Product>> for PatchProductRequestHandler {
    fn handle(&mut self, command: PatchProductCommand) -> Result<Product> {
        let id = command.id;
        let mut store = lock_store(&self.0)?;
        let existing = store.find_by_id(id)?.ok_or(ProductError::NotFound(id))?;

        if command.patch.is_empty() {
            log::debug!("Partial update of product {} names no known field", id);
        } else {
            log::debug!("Merging {:?} into product {}", command.patch, id);
        }
        let merged = merge_partial(&existing, command.patch, &self.1).map_err(|err| {
            log::warn!("Rejected partial update of product {}: {}", id, err);
            err
        })?;

        let product = store.save(merged)?;
        notify(&mut self.2, ProductUpdatedEvent(product.clone()));

        Ok(product)
    }
}
