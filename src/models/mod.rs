pub mod patch;
pub mod product;
