//! HTTP Handlers
//!
//! Thin translation between HTTP and the catalog services: parse the path,
//! run request validation, call the service, map the outcome to a status.

pub mod category;
pub mod health;
pub mod product;

use crate::shared::error::AppError;

/// Parse a numeric path id, rejecting anything else as a bad request.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", entity)))
}
