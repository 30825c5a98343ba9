mod get_all_products;
mod search_products;

pub use get_all_products::*;
pub use search_products::*;
