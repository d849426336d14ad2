//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use catalog_core::error::AppError;

use crate::error::ApiError;

/// Integer primary key taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid path: {}", e.body_text())))?;
        parse_id(&raw).map(Self).map_err(ApiError::from)
    }
}

/// Parses an integer ID from a path segment.
pub fn parse_id(s: &str) -> Result<i32, AppError> {
    s.parse::<i32>()
        .map_err(|_| AppError::validation(format!("Invalid id: '{s}' is not an integer")))
}
