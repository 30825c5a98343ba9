use crate::commands::{
    AddProductCommand, DeleteProductCommand, PatchProductCommand, UpdateProductCommand,
};
use crate::error::ProductError;
use crate::models::patch::ProductPatch;
use crate::models::product::ProductDraft;
use crate::queries::{GetAllProductsRequest, SearchProductsRequest};
use crate::validation::Violations;
use crate::SharedMediator;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, patch, post, put, HttpResponse};
use mediator::{Mediator, Request};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Nome do produto a ser procurado
    pub nome: String,
    /// Preço do produto a ser procurado
    pub preco: f64,
}

/// Sends `req` to its registered handler.
fn dispatch<Req, Res>(mediator: &SharedMediator, req: Req) -> Result<Res, ProductError>
where
    Req: Request<Result<Res, ProductError>> + 'static,
    Res: 'static,
{
    let mut mediator = mediator
        .lock()
        .map_err(|_| anyhow::anyhow!("mediator lock poisoned"))?;
    mediator.send(req)?
}

/// Create and full replace report only the first violation.
fn first_violation(violations: &Violations) -> HttpResponse {
    let message = violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_else(|| violations.to_string());
    HttpResponse::BadRequest().body(message)
}

#[utoipa::path(
    get,
    path = "/api/produtos/selecionar",
    tag = "produtos",
    responses(
        (status = 200, description = "Lista de produtos retornada com sucesso", body = [crate::models::product::Product]),
        (status = 500, description = "Erro interno no servidor")
    )
)]
#[get("/selecionar")]
pub async fn get_all(mediator: Data<SharedMediator>) -> Result<HttpResponse, ProductError> {
    let products = dispatch(&mediator, GetAllProductsRequest)?;
    Ok(HttpResponse::Ok().json(products))
}

#[utoipa::path(
    get,
    path = "/api/produtos/selecionaNomeEPreco",
    tag = "produtos",
    params(SearchParams),
    responses(
        (status = 200, description = "Lista de produtos retornada com sucesso", body = [crate::models::product::Product]),
        (status = 400, description = "Produto não encontrado", body = String)
    )
)]
#[get("/selecionaNomeEPreco")]
pub async fn search(
    mediator: Data<SharedMediator>,
    params: Query<SearchParams>,
) -> Result<HttpResponse, ProductError> {
    let params = params.into_inner();
    let products = dispatch(
        &mediator,
        SearchProductsRequest {
            name_pattern: params.nome,
            price_below: params.preco,
        },
    )?;

    if products.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .body("Não foi possível encontrar o que foi requisitado"));
    }

    Ok(HttpResponse::Ok().json(products))
}

#[utoipa::path(
    post,
    path = "/api/produtos/inserir",
    tag = "produtos",
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Produto inserido com sucesso", body = String),
        (status = 400, description = "Campo com valor inválido", body = String)
    )
)]
#[post("/inserir")]
pub async fn create(
    mediator: Data<SharedMediator>,
    body: Json<ProductDraft>,
) -> Result<HttpResponse, ProductError> {
    match dispatch(&mediator, AddProductCommand(body.into_inner())) {
        Ok(_) => Ok(HttpResponse::Ok().body("Produto inserido com sucesso")),
        Err(ProductError::ValidationFailed(violations)) => Ok(first_violation(&violations)),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    delete,
    path = "/api/produtos/excluir/{id}",
    tag = "produtos",
    params(("id" = i64, Path, description = "ID do produto a ser excluído")),
    responses(
        (status = 200, description = "Produto excluído com sucesso", body = String),
        (status = 404, description = "Produto não encontrado", body = String)
    )
)]
#[delete("/excluir/{id}")]
pub async fn delete(
    mediator: Data<SharedMediator>,
    path: Path<i64>,
) -> Result<HttpResponse, ProductError> {
    match dispatch(&mediator, DeleteProductCommand(path.into_inner())) {
        Ok(_) => Ok(HttpResponse::Ok().body("Produto excluído com sucesso")),
        Err(ProductError::NotFound(_)) => Ok(HttpResponse::NotFound().body("Este id não existe")),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    put,
    path = "/api/produtos/atualizar/{id}",
    tag = "produtos",
    params(("id" = i64, Path, description = "ID do produto a ser atualizado")),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Produto atualizado com sucesso", body = String),
        (status = 400, description = "Campo com valor inválido", body = String),
        (status = 404, description = "Produto não encontrado")
    )
)]
#[put("/atualizar/{id}")]
pub async fn update(
    mediator: Data<SharedMediator>,
    path: Path<i64>,
    body: Json<ProductDraft>,
) -> Result<HttpResponse, ProductError> {
    let command = UpdateProductCommand {
        id: path.into_inner(),
        product: body.into_inner(),
    };

    match dispatch(&mediator, command) {
        Ok(_) => Ok(HttpResponse::Ok().body("Produto atualizado com sucesso")),
        Err(ProductError::NotFound(_)) => Ok(HttpResponse::NotFound().finish()),
        Err(ProductError::ValidationFailed(violations)) => Ok(first_violation(&violations)),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    patch,
    path = "/api/produtos/atualizarParcial/{id}",
    tag = "produtos",
    params(("id" = i64, Path, description = "ID do produto a ser alterado")),
    request_body(
        content = ProductPatch,
        description = "Mapeamento de campos a serem atualizados com os novos valores"
    ),
    responses(
        (status = 200, description = "Produto alterado com sucesso", body = String),
        (status = 400, description = "Campo com valor inesperado", body = String),
        (status = 404, description = "Produto não encontrado", body = String)
    )
)]
#[patch("/atualizarParcial/{id}")]
pub async fn patch(
    mediator: Data<SharedMediator>,
    path: Path<i64>,
    body: Json<ProductPatch>,
) -> Result<HttpResponse, ProductError> {
    let command = PatchProductCommand {
        id: path.into_inner(),
        patch: body.into_inner(),
    };
    dispatch(&mediator, command)?;

    Ok(HttpResponse::Ok().body("Produto alterado com sucesso"))
}

#[cfg(test)]
mod tests {
    use crate::endpoints::configure;
    use crate::models::product::Product;
    use crate::services::memory_store::MemoryProductStore;
    use crate::services::product_store::{ProductStore, SharedProductStore};
    use crate::validation::ProductValidator;
    use crate::{create_mediator_service, SharedMediator};
    use actix_web::http::StatusCode;
    use actix_web::web::{Bytes, Data};
    use actix_web::{test, App};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new(create_mediator_service(
                        &$store,
                        ProductValidator::new(),
                    )))
                    .configure(configure),
            )
            .await
        };
    }

    fn burger() -> Product {
        Product {
            id: 1,
            name: "Burger".to_owned(),
            description: Some("x".to_owned()),
            price: 10.0,
            stock_quantity: 5,
        }
    }

    fn store_with(products: Vec<Product>) -> SharedProductStore {
        let mut store = MemoryProductStore::new();
        for product in products {
            store.save(product).unwrap();
        }
        Arc::new(Mutex::new(store))
    }

    fn all(store: &SharedProductStore) -> Vec<Product> {
        store.lock().unwrap().find_all().unwrap()
    }

    fn text(body: Bytes) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn lists_all_products() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionar")
            .to_request();
        let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(products, vec![burger()]);
    }

    #[actix_web::test]
    async fn list_uses_wire_field_names() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionar")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!([{"id": 1, "nome": "Burger", "descricao": "x", "preco": 10.0, "quantidadeEstoque": 5}])
        );
    }

    #[actix_web::test]
    async fn creates_product() {
        let store = store_with(vec![]);
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/produtos/inserir")
            .set_json(json!({"nome": "Burger", "descricao": "x", "preco": 10.0, "quantidadeEstoque": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(text(test::read_body(resp).await), "Produto inserido com sucesso");
        assert_eq!(all(&store), vec![burger()]);
    }

    #[actix_web::test]
    async fn create_with_negative_price_is_rejected() {
        let store = store_with(vec![]);
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/produtos/inserir")
            .set_json(json!({"nome": "Burger", "preco": -5, "quantidadeEstoque": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = text(test::read_body(resp).await);
        assert_eq!(body, "field 'preco': price must be at least 0");
        assert!(all(&store).is_empty());
    }

    #[actix_web::test]
    async fn create_with_malformed_body_is_rejected() {
        let store = store_with(vec![]);
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/produtos/inserir")
            .set_json(json!({"nome": "Burger", "preco": "caro", "quantidadeEstoque": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(all(&store).is_empty());
    }

    #[actix_web::test]
    async fn deletes_product() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::delete()
            .uri("/api/produtos/excluir/1")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(text(test::read_body(resp).await), "Produto excluído com sucesso");
        assert!(all(&store).is_empty());
    }

    #[actix_web::test]
    async fn delete_of_unknown_id_is_not_found() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::delete()
            .uri("/api/produtos/excluir/2")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(text(test::read_body(resp).await), "Este id não existe");
        assert_eq!(all(&store), vec![burger()]);
    }

    #[actix_web::test]
    async fn replaces_product() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/api/produtos/atualizar/1")
            .set_json(json!({"nome": "Pizza", "preco": 30, "quantidadeEstoque": 2}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            all(&store),
            vec![Product {
                id: 1,
                name: "Pizza".to_owned(),
                description: None,
                price: 30.0,
                stock_quantity: 2,
            }]
        );
    }

    #[actix_web::test]
    async fn replace_of_unknown_id_is_not_found() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/api/produtos/atualizar/7")
            .set_json(json!({"nome": "Pizza", "preco": 30, "quantidadeEstoque": 2}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn patch_with_integer_price() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/produtos/atualizarParcial/1")
            .set_json(json!({"preco": 12}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(text(test::read_body(resp).await), "Produto alterado com sucesso");
        assert_eq!(all(&store)[0].price, 12.0);
    }

    #[actix_web::test]
    async fn patch_with_short_name_is_rejected() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/produtos/atualizarParcial/1")
            .set_json(json!({"nome": "A"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = text(test::read_body(resp).await);
        assert!(body.contains("name"), "{}", body);
        assert_eq!(all(&store), vec![burger()]);
    }

    #[actix_web::test]
    async fn patch_with_bad_number_is_rejected() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/produtos/atualizarParcial/1")
            .set_json(json!({"quantidadeEstoque": "muitos"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = text(test::read_body(resp).await);
        assert!(body.contains("quantidadeEstoque"), "{}", body);
    }

    #[actix_web::test]
    async fn patch_of_unknown_id_is_not_found() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/produtos/atualizarParcial/3")
            .set_json(json!({"preco": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn searches_by_name_and_price() {
        let cheese = Product {
            id: 2,
            name: "Cheese BURGER".to_owned(),
            price: 120.0,
            ..burger()
        };
        let store = store_with(vec![burger(), cheese]);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionaNomeEPreco?nome=burger&preco=100")
            .to_request();
        let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(products, vec![burger()]);
    }

    #[actix_web::test]
    async fn empty_search_is_a_bad_request() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionaNomeEPreco?nome=pizza&preco=100")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            text(test::read_body(resp).await),
            "Não foi possível encontrar o que foi requisitado"
        );
    }

    #[actix_web::test]
    async fn search_without_price_is_a_bad_request() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionaNomeEPreco?nome=burger")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn patch_with_price_beyond_i64_is_rejected() {
        let store = store_with(vec![burger()]);
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/produtos/atualizarParcial/1")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"preco": 18446744073709551615}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = text(test::read_body(resp).await);
        assert_eq!(
            body,
            "field 'preco': expected a number, got integer 18446744073709551615"
        );
        assert_eq!(all(&store), vec![burger()]);
    }

    #[actix_web::test]
    async fn missing_handler_is_an_internal_error() {
        let mediator: SharedMediator =
            Arc::new(Mutex::new(mediator::DefaultMediator::builder().build()));
        let app = test::init_service(
            App::new()
                .app_data(Data::new(mediator))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/produtos/selecionar")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
