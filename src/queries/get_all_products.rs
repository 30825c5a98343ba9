use crate::error::Result;
use crate::models::product::Product;
use mediator::{Request, RequestHandler};
use crate::services::product_store::{lock_store, SharedProductStore};

pub struct GetAllProductsRequest;
impl Request<Result<Vec<Product>>> for GetAllProductsRequest {}

pub struct GetAllProductsRequestHandler(pub SharedProductStore);
impl RequestHandler<GetAllProductsRequest, Result<Vec<Product>>> for GetAllProductsRequestHandler {
    fn handle(&mut self, _: GetAllProductsRequest) -> Result<Vec<Product>> {
        Ok(lock_store(&self.0)?.find_all()?)
    }
}
