use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProductCategory, ProductCategory, ProductCategoryChanges};

use super::{Tables, next_id};
use crate::repositories::CategoryStore;

/// In-memory product category repository.
#[derive(Debug, Clone)]
pub struct MemoryCategoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCategoryRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn check_parent(tables: &Tables, parent: Option<i32>) -> AppResult<()> {
    match parent {
        Some(parent_id) if !tables.categories.contains_key(&parent_id) => Err(
            AppError::validation("ParentProductCategoryID references a category that does not exist"),
        ),
        _ => Ok(()),
    }
}

#[async_trait]
impl Repository for MemoryCategoryRepository {
    type Entity = ProductCategory;
    type Id = i32;
    type New = NewProductCategory;
    type Changes = ProductCategoryChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductCategory>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<ProductCategory>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.read().await.categories.contains_key(&id))
    }

    async fn create(&self, data: &NewProductCategory) -> AppResult<ProductCategory> {
        let mut tables = self.tables.write().await;
        check_parent(&tables, data.parent_product_category_id)?;
        let id = next_id(&tables.categories, "ProductCategoryID")?;
        let category = data.clone().into_record(id);
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductCategoryChanges,
    ) -> AppResult<Option<ProductCategory>> {
        let mut tables = self.tables.write().await;
        let Some(mut category) = tables.categories.get(&id).cloned() else {
            return Ok(None);
        };
        category.apply(changes);
        check_parent(&tables, category.parent_product_category_id)?;
        tables.categories.insert(id, category.clone());
        Ok(Some(category))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Ok(false);
        }
        let referenced = tables
            .products
            .values()
            .any(|p| p.product_category_id == Some(id))
            || tables
                .categories
                .values()
                .any(|c| c.parent_product_category_id == Some(id));
        if referenced {
            return Err(AppError::conflict(format!(
                "Category {id} is still referenced by products or subcategories"
            )));
        }
        tables.categories.remove(&id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.categories.len() as u64)
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryRepository {
    async fn count_children(&self, category_id: i32) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|c| c.parent_product_category_id == Some(category_id))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use catalog_core::error::ErrorKind;

    use super::*;
    use crate::memory::MemoryCatalog;

    fn new_category(name: &str, parent: Option<i32>) -> NewProductCategory {
        NewProductCategory {
            parent_product_category_id: parent,
            name: name.to_string(),
            rowguid: Uuid::new_v4(),
            modified_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_parent_must_exist() {
        let repo = MemoryCatalog::new().categories();
        let err = repo
            .create(&new_category("Road Bikes", Some(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let bikes = repo.create(&new_category("Bikes", None)).await.unwrap();
        let road = repo
            .create(&new_category("Road Bikes", Some(bikes.product_category_id)))
            .await
            .unwrap();
        assert_eq!(road.parent_product_category_id, Some(bikes.product_category_id));
        assert_eq!(repo.count_children(bikes.product_category_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_children_is_conflict() {
        let repo = MemoryCatalog::new().categories();
        let bikes = repo.create(&new_category("Bikes", None)).await.unwrap();
        let road = repo
            .create(&new_category("Road Bikes", Some(bikes.product_category_id)))
            .await
            .unwrap();

        let err = repo.delete(bikes.product_category_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        assert!(repo.delete(road.product_category_id).await.unwrap());
        assert!(repo.delete(bikes.product_category_id).await.unwrap());
        assert!(!repo.delete(bikes.product_category_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_detaches_parent() {
        let repo = MemoryCatalog::new().categories();
        let bikes = repo.create(&new_category("Bikes", None)).await.unwrap();
        let road = repo
            .create(&new_category("Road Bikes", Some(bikes.product_category_id)))
            .await
            .unwrap();

        let changes = ProductCategoryChanges {
            name: None,
            parent_product_category_id: Some(None),
            modified_date: Utc::now(),
        };
        let updated = repo
            .update(road.product_category_id, &changes)
            .await
            .unwrap()
            .expect("row exists");
        assert!(updated.is_root());
        assert_eq!(updated.name, "Road Bikes");
    }
}
