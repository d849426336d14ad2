//! Accounts that may obtain tokens, and where they are looked up.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use catalog_core::result::AppResult;

pub use memory::MemoryCredentialStore;

/// A login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Argon2 PHC hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Disabled accounts are refused at login and at token use.
    pub disabled: bool,
}

impl Account {
    /// Whether this account may authenticate.
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

/// Lookup of accounts by username.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by its exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
}
