//! Product category handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use catalog_entity::ProductCategory;

use crate::dto::request::{CategoryCreate, CategoryUpdate};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EntityId, ValidatedJson};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ProductCategory>>> {
    Ok(Json(state.category_service.list_categories(&auth).await?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<Json<ProductCategory>> {
    Ok(Json(state.category_service.get_category(&auth, id).await?))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CategoryCreate>,
) -> ApiResult<(StatusCode, Json<ProductCategory>)> {
    let category = state
        .category_service
        .create_category(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<CategoryUpdate>,
) -> ApiResult<Json<ProductCategory>> {
    let category = state
        .category_service
        .update_category(&auth, id, body.into())
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
