//! Product CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use catalog_entity::Product;

use crate::dto::request::{ProductCreate, ProductUpdate};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EntityId, ValidatedJson};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state.product_service.list_products(&auth).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<Json<Product>> {
    let product = state.product_service.get_product(&auth, id).await?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state
        .product_service
        .create_product(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    let product = state
        .product_service
        .update_product(&auth, id, body.into())
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<StatusCode> {
    state.product_service.delete_product(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
