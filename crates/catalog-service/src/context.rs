//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_auth::Principal;

/// Context for the current authenticated request.
///
/// Built by the API layer from the verified bearer token and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated username.
    pub username: String,
    /// Whether the caller is an administrator.
    pub is_admin: bool,
    /// ID of the token the request presented.
    pub token_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(username: impl Into<String>, is_admin: bool, token_id: Uuid) -> Self {
        Self {
            username: username.into(),
            is_admin,
            token_id,
            request_time: Utc::now(),
        }
    }

    /// Creates a context for a verified principal.
    pub fn from_principal(principal: &Principal) -> Self {
        Self::new(
            principal.username.clone(),
            principal.is_admin,
            principal.token_id,
        )
    }

    /// A context for work the server performs on its own behalf.
    pub fn system() -> Self {
        Self::new("system", true, Uuid::nil())
    }
}
