use crate::validation::Violations;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// A convenient result type.
pub type Result<T> = std::result::Result<T, ProductError>;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found: {0}")]
    NotFound(i64),
    #[error("{0}")]
    ValidationFailed(Violations),
    #[error("field '{field}': expected {expected}, got {found}")]
    TypeCoercionFailed {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("product store error: {0}")]
    Store(#[from] anyhow::Error),
    #[error("request dispatch failed: {0}")]
    Dispatch(#[from] mediator::error::Error),
}

impl From<Violations> for ProductError {
    fn from(violations: Violations) -> Self {
        ProductError::ValidationFailed(violations)
    }
}

impl ResponseError for ProductError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::ValidationFailed(_) | ProductError::TypeCoercionFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProductError::Store(_) | ProductError::Dispatch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ProductError::Store(err) => {
                log::error!("{:#}", err);
                HttpResponse::InternalServerError().body("internal server error")
            }
            ProductError::Dispatch(err) => {
                log::error!("{}", err);
                HttpResponse::InternalServerError().body("internal server error")
            }
            _ => HttpResponse::build(self.status_code()).body(self.to_string()),
        }
    }
}
