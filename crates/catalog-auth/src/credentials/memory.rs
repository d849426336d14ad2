//! Credential store seeded from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use catalog_core::config::{AuthConfig, UserSeed};
use catalog_core::error::AppError;
use catalog_core::result::AppResult;

use super::{Account, CredentialStore};
use crate::password::PasswordHasher;

/// Accounts held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the `[[auth.users]]` entries.
    ///
    /// Plaintext bootstrap passwords are hashed here and never kept.
    pub async fn from_config(config: &AuthConfig, hasher: &PasswordHasher) -> AppResult<Self> {
        let store = Self::new();
        for seed in &config.users {
            let account = account_from_seed(seed, hasher)?;
            store.insert(account).await?;
        }
        info!(accounts = config.users.len(), "Credential store loaded");
        Ok(store)
    }

    /// Add an account. Usernames must be unique.
    pub async fn insert(&self, account: Account) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(AppError::configuration(format!(
                "Duplicate account '{}'",
                account.username
            )));
        }
        accounts.insert(account.username.clone(), account);
        Ok(())
    }

    /// Number of accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the store has no accounts.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn account_from_seed(seed: &UserSeed, hasher: &PasswordHasher) -> AppResult<Account> {
    let password_hash = match (&seed.password_hash, &seed.password) {
        (Some(hash), _) => {
            if !PasswordHasher::is_valid_hash(hash) {
                return Err(AppError::configuration(format!(
                    "auth.users entry '{}' has a malformed password_hash",
                    seed.username
                )));
            }
            hash.clone()
        }
        (None, Some(password)) => {
            warn!(
                username = %seed.username,
                "Account configured with a plaintext password"
            );
            hasher.hash_password(password)?
        }
        (None, None) => {
            return Err(AppError::configuration(format!(
                "auth.users entry '{}' needs either password or password_hash",
                seed.username
            )));
        }
    };

    Ok(Account {
        username: seed.username.clone(),
        full_name: seed.full_name.clone(),
        email: seed.email.clone(),
        password_hash,
        is_admin: seed.is_admin,
        disabled: seed.disabled,
    })
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }
}
