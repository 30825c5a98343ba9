use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A product as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1234)]
    pub id: i64,
    #[serde(rename = "nome")]
    #[schema(example = "Hamburguer de frango")]
    pub name: String,
    #[serde(rename = "descricao")]
    #[schema(example = "Hamburguer de frango congelado 500g")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    #[schema(example = 1999.99)]
    pub price: f64,
    #[serde(rename = "quantidadeEstoque")]
    #[schema(example = 50)]
    pub stock_quantity: i32,
}

/// Body of create and full-replace requests, and the working copy of a
/// partial update. Every field may be absent; absence of a required field is
/// reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDraft {
    /// Ignored on create and replace, the store owns identifiers.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nome", default)]
    #[validate(
        required(message = "name required"),
        length(min = 2, message = "name too short (minimum 2 characters)")
    )]
    pub name: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco", default)]
    #[validate(
        required(message = "price required"),
        range(min = 0.0, message = "price must be at least 0")
    )]
    pub price: Option<f64>,
    #[serde(rename = "quantidadeEstoque", default)]
    #[validate(
        required(message = "stock quantity required"),
        range(min = 0, message = "stock quantity must be at least 0")
    )]
    pub stock_quantity: Option<i32>,
}

/// A draft that passed validation and has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
}

impl NewProduct {
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        ProductDraft {
            id: Some(product.id),
            name: Some(product.name),
            description: product.description,
            price: Some(product.price),
            stock_quantity: Some(product.stock_quantity),
        }
    }
}
