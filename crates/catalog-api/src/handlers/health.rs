//! Liveness and connectivity handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use catalog_core::error::AppError;

use crate::dto::response::{HealthResponse, MessageResponse, WelcomeResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the AdventureWorks catalog API".to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.repositories.backend_name().to_string(),
        started_at: state.started_at,
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// GET /api/test-db
pub async fn test_db(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    if !state.repositories.ping().await? {
        return Err(AppError::database("Database connection check failed").into());
    }
    tracing::debug!(user = %auth.username, "Database connectivity check succeeded");
    Ok(Json(MessageResponse::new(format!(
        "Database connection successful ({})",
        state.repositories.backend_name()
    ))))
}
