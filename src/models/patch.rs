use crate::error::ProductError;
use crate::models::product::ProductDraft;
use serde::Deserialize;
use utoipa::ToSchema;

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_F64_INT: i64 = 1 << 53;

/// A number as it arrived on the wire. Integers above `i64::MAX` land in
/// `Unsigned`, never in `Float`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Other(serde_json::Value),
}

impl NumericValue {
    fn describe(&self) -> String {
        match self {
            NumericValue::Integer(n) => format!("integer {}", n),
            NumericValue::Unsigned(n) => format!("integer {}", n),
            NumericValue::Float(n) => format!("float {}", n),
            NumericValue::Other(value) => value.to_string(),
        }
    }

    /// Reads the value as a price. Integers are widened when the conversion
    /// is exact.
    pub fn to_price(&self, field: &'static str) -> Result<f64, ProductError> {
        match *self {
            NumericValue::Float(n) => Ok(n),
            NumericValue::Integer(n) if (-MAX_EXACT_F64_INT..=MAX_EXACT_F64_INT).contains(&n) => {
                Ok(n as f64)
            }
            NumericValue::Unsigned(n) if n <= MAX_EXACT_F64_INT as u64 => Ok(n as f64),
            _ => Err(ProductError::TypeCoercionFailed {
                field,
                expected: "a number",
                found: self.describe(),
            }),
        }
    }

    /// Reads the value as a stock quantity, which only accepts integers.
    pub fn to_quantity(&self, field: &'static str) -> Result<i32, ProductError> {
        match *self {
            NumericValue::Integer(n) => i32::try_from(n).map_err(|_| self.out_of_range(field)),
            NumericValue::Unsigned(n) => i32::try_from(n).map_err(|_| self.out_of_range(field)),
            _ => Err(ProductError::TypeCoercionFailed {
                field,
                expected: "an integer",
                found: self.describe(),
            }),
        }
    }

    fn out_of_range(&self, field: &'static str) -> ProductError {
        ProductError::TypeCoercionFailed {
            field,
            expected: "a 32-bit integer",
            found: self.describe(),
        }
    }
}

/// Body of a partial update.
///
/// The outer `Option` tells whether the key was sent, the inner one whether
/// it was `null`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[schema(example = json!({"nome": "Novo nome", "descricao": "Nova descricao", "preco": 10.0, "quantidadeEstoque": 100}))]
pub struct ProductPatch {
    #[serde(rename = "nome", default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(rename = "descricao", default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(rename = "preco", default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<NumericValue>>,
    #[serde(
        rename = "quantidadeEstoque",
        default,
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub stock_quantity: Option<Option<NumericValue>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }

    /// Overwrites the fields present in the patch on `draft`, leaving the
    /// rest untouched. Numbers are coerced before anything is written, so a
    /// coercion failure leaves `draft` unchanged.
    pub fn apply_to(self, draft: &mut ProductDraft) -> Result<(), ProductError> {
        let price = match &self.price {
            Some(Some(value)) => Some(Some(value.to_price("preco")?)),
            Some(None) => Some(None),
            None => None,
        };
        let stock_quantity = match &self.stock_quantity {
            Some(Some(value)) => Some(Some(value.to_quantity("quantidadeEstoque")?)),
            Some(None) => Some(None),
            None => None,
        };

        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = price {
            draft.price = price;
        }
        if let Some(stock_quantity) = stock_quantity {
            draft.stock_quantity = stock_quantity;
        }

        Ok(())
    }
}
