//! Category Handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use validator::Validate;

use super::parse_id;
use crate::application::dto::request::CategoryRequest;
use crate::application::dto::response::CategoryResponse;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List all categories with their products
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.categories.get_all().await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Get category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_id(&category_id, "category")?;

    let category = state
        .categories
        .get_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<CategoryResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let category = state.categories.add(body.into()).await?;
    let location = format!("/api/v1/categories/{}", category.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CategoryResponse::from(category)),
    ))
}

/// Update category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(body): Json<CategoryRequest>,
) -> Result<StatusCode, AppError> {
    let category_id = parse_id(&category_id, "category")?;

    if body.conflicts_with(category_id) {
        return Err(AppError::BadRequest(
            "Category ID in body does not match the path".into(),
        ));
    }

    body.validate().map_err(validation_error)?;

    state
        .categories
        .update(category_id, body.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let category_id = parse_id(&category_id, "category")?;

    if !state.categories.delete(category_id).await? {
        return Err(AppError::NotFound("Category not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
