use crate::endpoints::products;
use crate::models::patch::ProductPatch;
use crate::models::product::{Product, ProductDraft};
use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "API de estoque", description = "Cadastro e manutenção de produtos"),
    paths(
        products::get_all,
        products::search,
        products::create,
        products::delete,
        products::update,
        products::patch
    ),
    components(schemas(Product, ProductDraft, ProductPatch)),
    tags((name = "produtos", description = "Operações sobre produtos"))
)]
pub struct ApiDoc;

#[get("/v3/api-docs")]
pub async fn api_docs() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
