//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository trait.
///
/// Each implementation owns its session handling: a connection (or lock)
/// is acquired inside every call and released before it returns, on the
/// success path and on every error path alike. Entity-specific query
/// methods live on the concrete repository structs.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// The persisted record.
    type Entity: Send + Sync + 'static;
    /// Primary key type.
    type Id: Send + Sync + Copy + 'static;
    /// Fully-populated data for an insert.
    type New: Send + Sync + 'static;
    /// Partial field set for an update.
    type Changes: Send + Sync + 'static;

    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: Self::Id) -> AppResult<Option<Self::Entity>>;

    /// List every entity ordered by primary key.
    async fn find_all(&self) -> AppResult<Vec<Self::Entity>>;

    /// Check whether a row with the given primary key exists.
    async fn exists(&self, id: Self::Id) -> AppResult<bool>;

    /// Insert a new entity and return it with generated columns populated.
    async fn create(&self, data: &Self::New) -> AppResult<Self::Entity>;

    /// Apply a partial update. Returns `None` when no row matches `id`.
    async fn update(&self, id: Self::Id, changes: &Self::Changes)
    -> AppResult<Option<Self::Entity>>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: Self::Id) -> AppResult<bool>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
