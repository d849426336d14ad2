//! Token issuance.

use axum::Json;
use axum::extract::State;

use crate::dto::response::TokenResponse;
use crate::error::ApiResult;
use crate::extractors::LoginForm;
use crate::state::AppState;

/// POST /token
///
/// Exchanges a username and password for a bearer token.
pub async fn token(
    State(state): State<AppState>,
    LoginForm(login): LoginForm,
) -> ApiResult<Json<TokenResponse>> {
    let token = state
        .authenticator
        .login(&login.username, &login.password)
        .await?;
    Ok(Json(token.into()))
}
