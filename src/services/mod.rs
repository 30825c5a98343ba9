pub mod memory_store;
pub mod product_store;
pub mod redis_service;
