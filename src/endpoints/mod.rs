pub mod docs;
pub mod products;

use actix_web::{error, web, HttpResponse};

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api/produtos")
                .service(products::get_all)
                .service(products::search)
                .service(products::create)
                .service(products::delete)
                .service(products::update)
                .service(products::patch),
        )
        .service(docs::api_docs);
}

/// Malformed JSON bodies become a plain 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("invalid request body: {}", err);
        log::warn!("{}", message);
        error::InternalError::from_response(err, HttpResponse::BadRequest().body(message)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("invalid query string: {}", err);
        log::warn!("{}", message);
        error::InternalError::from_response(err, HttpResponse::BadRequest().body(message)).into()
    })
}
