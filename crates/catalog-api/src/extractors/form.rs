//! Login credentials from either a form or a JSON body.

use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::{Form, Json};
use validator::Validate;

use catalog_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::error::ApiError;

/// Username and password posted to `/token`.
///
/// `application/x-www-form-urlencoded` is the primary form; a JSON body
/// is accepted when the content type says so.
#[derive(Debug, Clone)]
pub struct LoginForm(pub LoginRequest);

impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let login = if is_json {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| AppError::validation(e.body_text()))?
        } else {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| AppError::validation(e.body_text()))?
        };

        login
            .validate()
            .map_err(|errors| AppError::validation(errors.to_string()))?;

        Ok(Self(login))
    }
}
