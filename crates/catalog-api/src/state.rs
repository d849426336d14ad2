//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use catalog_auth::{Authenticator, CredentialStore};
use catalog_core::config::AppConfig;
use catalog_database::CatalogRepositories;
use catalog_service::{CategoryService, ModelService, ProductService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When this process started serving
    pub started_at: DateTime<Utc>,

    // ── Infrastructure ───────────────────────────────────────
    /// Catalog repositories (PostgreSQL or in-memory)
    pub repositories: CatalogRepositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Login and bearer token verification
    pub authenticator: Arc<Authenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Product service
    pub product_service: Arc<ProductService>,
    /// Category service
    pub category_service: Arc<CategoryService>,
    /// Product model service
    pub model_service: Arc<ModelService>,
}

impl AppState {
    /// Wires services over the given repositories and credential store.
    pub fn new(
        config: AppConfig,
        repositories: CatalogRepositories,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let authenticator = Arc::new(Authenticator::new(&config.auth, credentials));

        let product_service = Arc::new(ProductService::new(
            Arc::clone(&repositories.products),
            Arc::clone(&repositories.categories),
            Arc::clone(&repositories.models),
        ));
        let category_service = Arc::new(CategoryService::new(
            Arc::clone(&repositories.categories),
            Arc::clone(&repositories.products),
        ));
        let model_service = Arc::new(ModelService::new(
            Arc::clone(&repositories.models),
            Arc::clone(&repositories.products),
        ));

        Self {
            config: Arc::new(config),
            started_at: Utc::now(),
            repositories,
            authenticator,
            product_service,
            category_service,
            model_service,
        }
    }
}
