//! In-process implementation of the catalog stores.
//!
//! All three repositories share one set of tables behind a single lock so
//! that cross-table rules (foreign keys, restricted deletes) are checked
//! and applied atomically, the same way the database enforces them.

mod category;
mod product;
mod product_model;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_entity::{Product, ProductCategory, ProductModel};

pub use category::MemoryCategoryRepository;
pub use product::MemoryProductRepository;
pub use product_model::MemoryModelRepository;

/// The catalog tables, keyed and ordered by primary key.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) products: BTreeMap<i32, Product>,
    pub(crate) categories: BTreeMap<i32, ProductCategory>,
    pub(crate) models: BTreeMap<i32, ProductModel>,
}

/// Shared handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Product repository over this catalog.
    pub fn products(&self) -> MemoryProductRepository {
        MemoryProductRepository::new(Arc::clone(&self.tables))
    }

    /// Category repository over this catalog.
    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository::new(Arc::clone(&self.tables))
    }

    /// Product model repository over this catalog.
    pub fn models(&self) -> MemoryModelRepository {
        MemoryModelRepository::new(Arc::clone(&self.tables))
    }
}

/// Next identity value for a table: one past the current maximum.
///
/// Fails once the maximum key is `i32::MAX`; callers must then supply an
/// explicit id below it.
pub(crate) fn next_id<V>(table: &BTreeMap<i32, V>, column: &str) -> AppResult<i32> {
    match table.keys().next_back() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            AppError::validation(format!("No {column} values left to assign"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        let mut table = BTreeMap::new();
        assert_eq!(next_id(&table, "ProductID").unwrap(), 1);
        table.insert(7, ());
        table.insert(3, ());
        assert_eq!(next_id(&table, "ProductID").unwrap(), 8);
    }

    #[test]
    fn test_next_id_exhausted() {
        let mut table = BTreeMap::new();
        table.insert(i32::MAX, ());
        let err = next_id(&table, "ProductID").unwrap_err();
        assert_eq!(err.kind, catalog_core::error::ErrorKind::Validation);
        assert!(err.message.contains("ProductID"));
    }
}
