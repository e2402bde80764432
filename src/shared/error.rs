//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::services::{CategoryError, ProductError};
use crate::shared::validation::ValidationFailure;

/// Failure raised by the persistence port.
///
/// Constraint violations are classified so that services can tell an
/// anticipated integrity race apart from a genuine store fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    #[error("Check violation: {0}")]
    CheckViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Identity exhausted: {0}")]
    IdentityExhausted(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let detail = db_err.message().to_string();
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(detail);
            }
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(detail);
            }
            if db_err.is_check_violation() {
                return StoreError::CheckViolation(detail);
            }
        }
        StoreError::Database(e)
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(ValidationFailure),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<CategoryError> for AppError {
    fn from(e: CategoryError) -> Self {
        match e {
            CategoryError::AlreadyExists(id) => {
                AppError::BadRequest(format!("A category with ID {} already exists.", id))
            }
            CategoryError::Validation(failure) => AppError::Validation(failure),
            e @ CategoryError::InUse { .. } => AppError::Conflict(e.to_string()),
            CategoryError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::AlreadyExists(id) => {
                AppError::BadRequest(format!("A product with ID {} already exists.", id))
            }
            ProductError::Validation(failure) => AppError::Validation(failure),
            ProductError::Store(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, 10005, msg.clone(), None),
            AppError::Validation(failure) => (
                StatusCode::BAD_REQUEST,
                10007,
                "Validation failed".to_string(),
                Some(failure.field_errors()),
            ),
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into(), None)
            }
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
