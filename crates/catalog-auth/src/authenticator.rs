//! Login and bearer token verification flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use catalog_core::config::AuthConfig;
use catalog_core::error::AppError;

use crate::credentials::{Account, CredentialStore};
use crate::jwt::{AccessToken, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

const INVALID_LOGIN: &str = "Incorrect username or password";
const INVALID_TOKEN: &str = "Could not validate credentials";

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
    /// ID of the token the request presented.
    pub token_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Verifies credentials and issues or checks access tokens.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("store", &self.store)
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl Authenticator {
    /// Creates an authenticator over a credential store.
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Exchanges a username and password for an access token.
    ///
    /// Unknown users, wrong passwords and disabled accounts all fail with
    /// the same authentication error.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AppError> {
        let account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_LOGIN))?;

        if !self.hasher.verify_password(password, &account.password_hash)? {
            warn!(username = %username, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_LOGIN));
        }

        if !account.is_active() {
            warn!(username = %username, "Login refused: account disabled");
            return Err(AppError::authentication(INVALID_LOGIN));
        }

        let token = self.encoder.issue(&account.username, account.is_admin)?;
        info!(username = %account.username, jti = %token.jti, "Access token issued");
        Ok(token)
    }

    /// Resolves a bearer token to the principal it was issued to.
    ///
    /// The account must still exist and be enabled.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.decoder.decode_access_token(token)?;

        let account: Account = self
            .store
            .find_by_username(claims.username())
            .await?
            .filter(Account::is_active)
            .ok_or_else(|| AppError::authentication(INVALID_TOKEN))?;

        Ok(Principal {
            username: account.username,
            full_name: account.full_name,
            is_admin: account.is_admin,
            token_id: claims.jti,
            expires_at: claims.expires_at(),
        })
    }
}
