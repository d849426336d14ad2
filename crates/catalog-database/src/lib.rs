//! # catalog-database
//!
//! PostgreSQL connection management, migrations and the repository
//! implementations for the `SalesLT` catalog tables. An in-memory
//! implementation of the same repository traits lives in [`memory`].

pub mod catalog;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use catalog::CatalogRepositories;
pub use connection::DatabasePool;
pub use repositories::{CategoryStore, ModelStore, ProductStore};
