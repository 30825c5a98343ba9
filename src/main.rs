mod commands;
mod config;
mod endpoints;
mod error;
mod events;
mod models;
mod queries;
mod services;
mod validation;

use crate::config::Config;
use crate::services::memory_store::MemoryProductStore;
use crate::services::product_store::SharedProductStore;
use crate::services::redis_service::RedisProductStore;
use crate::validation::ProductValidator;
use actix_web::middleware::TrailingSlash;
use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use mediator::DefaultMediator;
use std::sync::{Arc, Mutex};

pub type SharedMediator = Arc<Mutex<DefaultMediator>>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = create_product_store(&config)?;
    let mediator = create_mediator_service(&store, ProductValidator::new());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::new(TrailingSlash::Trim))
            .wrap(middleware::Logger::default())
            .app_data(Data::new(mediator.clone()))
            .configure(endpoints::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    // On server start
    tokio::join!(server, on_server_start(&config)).0?;
    Ok(())
}

async fn on_server_start(config: &Config) {
    log::info!(
        "Inventory server listening on {}:{}",
        config.host,
        config.port
    );
}

fn create_mediator_service(
    store: &SharedProductStore,
    validator: ProductValidator,
) -> SharedMediator {
    use commands::*;
    use events::*;
    use queries::*;

    let store = store.clone();
    let mediator = DefaultMediator::builder()
        // Requests
        .add_handler(GetAllProductsRequestHandler(store.clone()))
        .add_handler(SearchProductsRequestHandler(store.clone()))
        .add_handler_deferred(|m| AddProductRequestHandler(store.clone(), validator, m))
        .add_handler_deferred(|m| UpdateProductRequestHandler(store.clone(), validator, m))
        .add_handler_deferred(|m| PatchProductRequestHandler(store.clone(), validator, m))
        .add_handler_deferred(|m| DeleteProductRequestHandler(store.clone(), m))
        // Events
        .subscribe_fn(|event: ProductAddedEvent| {
            log::info!("Added: {} - {}", event.0.name, event.0.id);
        })
        .subscribe_fn(|event: ProductUpdatedEvent| {
            log::info!("Updated: {} - {}", event.0.name, event.0.id);
        })
        .subscribe_fn(|event: ProductDeletedEvent| {
            log::info!("Deleted: {} - {}", event.0.name, event.0.id);
        })
        .build();

    Arc::new(Mutex::new(mediator))
}

fn create_product_store(config: &Config) -> anyhow::Result<SharedProductStore> {
    let store: SharedProductStore = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            log::info!("Storing products in Redis under '{}'", config.products_key);
            Arc::new(Mutex::new(RedisProductStore::new(
                client,
                config.products_key.clone(),
            )))
        }
        None => {
            log::warn!("REDIS_URL is not set, products are kept in memory");
            Arc::new(Mutex::new(MemoryProductStore::new()))
        }
    };

    Ok(store)
}
