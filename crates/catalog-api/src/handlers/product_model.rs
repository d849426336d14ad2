//! Product model handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use catalog_entity::ProductModel;

use crate::dto::request::{ModelCreate, ModelUpdate};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EntityId, ValidatedJson};
use crate::state::AppState;

/// GET /api/models
pub async fn list_models(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ProductModel>>> {
    Ok(Json(state.model_service.list_models(&auth).await?))
}

/// GET /api/models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<Json<ProductModel>> {
    Ok(Json(state.model_service.get_model(&auth, id).await?))
}

/// POST /api/models
pub async fn create_model(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<ModelCreate>,
) -> ApiResult<(StatusCode, Json<ProductModel>)> {
    let model = state.model_service.create_model(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT /api/models/{id}
pub async fn update_model(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<ModelUpdate>,
) -> ApiResult<Json<ProductModel>> {
    let model = state
        .model_service
        .update_model(&auth, id, body.into())
        .await?;
    Ok(Json(model))
}

/// DELETE /api/models/{id}
pub async fn delete_model(
    State(state): State<AppState>,
    auth: AuthUser,
    EntityId(id): EntityId,
) -> ApiResult<StatusCode> {
    state.model_service.delete_model(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
