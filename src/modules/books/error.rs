use bookshelf_http::error::AppError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::models::BookId;

/// One rejected field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: &'static str,
}

impl FieldViolation {
    pub fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }
}

/// Failures raised by catalog operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{message}")]
    Validation {
        message: String,
        violations: Vec<FieldViolation>,
    },

    #[error("Book not found - {0}")]
    NotFound(BookId),
}

impl CatalogError {
    pub(crate) fn invalid_request(violations: Vec<FieldViolation>) -> Self {
        Self::Validation {
            message: "invalid book request".to_string(),
            violations,
        }
    }

    pub(crate) fn invalid_id(id: BookId) -> Self {
        Self::Validation {
            message: format!("invalid book id {}", id),
            violations: vec![FieldViolation::new(
                "id",
                "must be greater than or equal to 1",
            )],
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation {
                message,
                violations,
            } => {
                let details = violations
                    .iter()
                    .map(|v| json!({"field": v.field, "error": v.error}))
                    .collect();
                AppError::validation(details, message)
            }
            not_found @ CatalogError::NotFound(_) => AppError::not_found(not_found.to_string()),
        }
    }
}
