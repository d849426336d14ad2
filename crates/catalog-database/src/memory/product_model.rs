use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProductModel, ProductModel, ProductModelChanges};

use super::{Tables, next_id};

/// In-memory product model repository.
#[derive(Debug, Clone)]
pub struct MemoryModelRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryModelRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl Repository for MemoryModelRepository {
    type Entity = ProductModel;
    type Id = i32;
    type New = NewProductModel;
    type Changes = ProductModelChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductModel>> {
        Ok(self.tables.read().await.models.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<ProductModel>> {
        Ok(self.tables.read().await.models.values().cloned().collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.read().await.models.contains_key(&id))
    }

    async fn create(&self, data: &NewProductModel) -> AppResult<ProductModel> {
        let mut tables = self.tables.write().await;
        let id = next_id(&tables.models, "ProductModelID")?;
        let model = data.clone().into_record(id);
        tables.models.insert(id, model.clone());
        Ok(model)
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductModelChanges,
    ) -> AppResult<Option<ProductModel>> {
        let mut tables = self.tables.write().await;
        Ok(tables.models.get_mut(&id).map(|model| {
            model.apply(changes);
            model.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.models.contains_key(&id) {
            return Ok(false);
        }
        if tables
            .products
            .values()
            .any(|p| p.product_model_id == Some(id))
        {
            return Err(AppError::conflict(format!(
                "Product model {id} is still referenced by products"
            )));
        }
        tables.models.remove(&id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.models.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::memory::MemoryCatalog;

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = MemoryCatalog::new().models();
        let created = repo
            .create(&NewProductModel {
                name: "Mountain-100".to_string(),
                description: Some("Top of the line".to_string()),
                rowguid: Uuid::new_v4(),
                modified_date: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(created.product_model_id, 1);

        let changes = ProductModelChanges {
            name: None,
            description: Some(None),
            modified_date: Utc::now(),
        };
        let updated = repo
            .update(created.product_model_id, &changes)
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.name, "Mountain-100");
        assert!(updated.description.is_none());

        assert!(repo.delete(created.product_model_id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
