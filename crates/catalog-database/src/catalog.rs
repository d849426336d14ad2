//! The set of repositories backing one running catalog.

use std::sync::Arc;

use tracing::info;

use catalog_core::config::{DatabaseBackend, DatabaseConfig};
use catalog_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryCatalog;
use crate::migration::run_migrations;
use crate::repositories::{
    CategoryRepository, CategoryStore, ModelStore, ProductModelRepository, ProductRepository,
    ProductStore,
};

/// Handles to every catalog store, independent of the backend behind them.
#[derive(Clone)]
pub struct CatalogRepositories {
    pub products: Arc<dyn ProductStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub models: Arc<dyn ModelStore>,
    /// The connection pool, when backed by PostgreSQL.
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for CatalogRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRepositories")
            .field("backend", &self.backend_name())
            .finish()
    }
}

impl CatalogRepositories {
    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            products: Arc::new(ProductRepository::new(pg.clone())),
            categories: Arc::new(CategoryRepository::new(pg.clone())),
            models: Arc::new(ProductModelRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Repositories over a fresh in-memory catalog.
    pub fn memory() -> Self {
        let catalog = MemoryCatalog::new();
        Self {
            products: Arc::new(catalog.products()),
            categories: Arc::new(catalog.categories()),
            models: Arc::new(catalog.models()),
            pool: None,
        }
    }

    /// Build the repositories the configuration asks for, connecting and
    /// optionally migrating the database first.
    pub async fn from_config(config: &DatabaseConfig, migrate: bool) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory catalog store");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if migrate {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Short name of the backing store.
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Verify the store is reachable.
    pub async fn ping(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release database connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_pings() {
        let repos = CatalogRepositories::memory();
        assert_eq!(repos.backend_name(), "memory");
        assert!(repos.ping().await.unwrap());
        assert_eq!(repos.products.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_from_config_memory() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Memory,
            ..DatabaseConfig::default()
        };
        let repos = CatalogRepositories::from_config(&config, true).await.unwrap();
        assert_eq!(repos.backend_name(), "memory");
    }
}
