use crate::models::product::{NewProduct, ProductDraft};
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Fields checked by the validator, in the order violations are reported.
/// Each entry maps the Rust field name to the name clients see; errors are
/// looked up under both.
const CHECKED_FIELDS: [(&str, &str); 3] = [
    ("name", "nome"),
    ("price", "preco"),
    ("stock_quantity", "quantidadeEstoque"),
];

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Every violation found on a candidate product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn touches(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, violation) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for Violations {
    fn from(errors: ValidationErrors) -> Self {
        let by_field = errors.field_errors();
        let mut violations = Vec::new();

        for (field, wire_name) in CHECKED_FIELDS {
            let Some(errors) = by_field.get(field).or_else(|| by_field.get(wire_name)) else {
                continue;
            };

            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());

                violations.push(Violation {
                    field: wire_name,
                    message,
                });
            }
        }

        Violations(violations)
    }
}

/// Checks products against the field constraints. Holds no state, so a copy
/// can be handed to every handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductValidator;

impl ProductValidator {
    pub fn new() -> Self {
        ProductValidator
    }

    /// Returns every violated rule, or an empty set when the draft is valid.
    pub fn validate(&self, candidate: &ProductDraft) -> Violations {
        match candidate.validate() {
            Ok(()) => Violations::default(),
            Err(errors) => Violations::from(errors),
        }
    }

    /// Validates the draft and, when it holds, returns it with concrete fields.
    pub fn check(&self, candidate: ProductDraft) -> Result<NewProduct, Violations> {
        let violations = self.validate(&candidate);
        if !violations.is_empty() {
            return Err(violations);
        }

        match candidate {
            ProductDraft {
                name: Some(name),
                description,
                price: Some(price),
                stock_quantity: Some(stock_quantity),
                ..
            } => Ok(NewProduct {
                name,
                description,
                price,
                stock_quantity,
            }),
            // The required rules reject every draft that misses one of these.
            _ => Err(violations),
        }
    }
}
