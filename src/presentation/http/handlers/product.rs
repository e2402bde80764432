//! Product Handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use validator::Validate;

use super::parse_id;
use crate::application::dto::request::ProductRequest;
use crate::application::dto::response::ProductResponse;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.get_all().await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product_id = parse_id(&product_id, "product")?;

    let product = state
        .products
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    Ok(Json(ProductResponse::from(product)))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ProductResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let product = state.products.add(body.into()).await?;
    let location = format!("/api/v1/products/{}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductResponse::from(product)),
    ))
}

/// Update product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(body): Json<ProductRequest>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "product")?;

    if body.conflicts_with(product_id) {
        return Err(AppError::BadRequest(
            "Product ID in body does not match the path".into(),
        ));
    }

    body.validate().map_err(validation_error)?;

    state
        .products
        .update(product_id, body.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "product")?;

    if !state.products.delete(product_id).await? {
        return Err(AppError::NotFound("Product not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
