//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Signing secret used when none is configured. Only accepted with the
/// in-memory backend.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Accounts known to the credential store.
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            users: Vec::new(),
        }
    }
}

/// One account entry seeded into the credential store at startup.
///
/// Exactly one of `password_hash` (an Argon2 PHC string) or `password`
/// (bootstrap plaintext, hashed on load) must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeed {
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Pre-computed Argon2 hash.
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Plaintext bootstrap password.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Administrator flag carried into issued tokens.
    #[serde(default)]
    pub is_admin: bool,
    /// Disabled accounts can neither log in nor use issued tokens.
    #[serde(default)]
    pub disabled: bool,
}

impl AuthConfig {
    /// Whether tokens would be signed with the publicly known default.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    30
}
