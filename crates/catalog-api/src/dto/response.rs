//! Response DTOs.
//!
//! Catalog entities serialize themselves with their column names and are
//! returned as-is; the types here cover the remaining endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_auth::AccessToken;

/// Body returned by `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.token,
            token_type: "bearer".to_string(),
            expires_in: token.expires_in,
        }
    }
}

/// Plain `{ "message": ... }` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub name: String,
    pub version: String,
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` while the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Backing store name (`postgres` or `memory`).
    pub backend: String,
    /// When the server started.
    pub started_at: DateTime<Utc>,
    /// Seconds since start.
    pub uptime_seconds: i64,
}
