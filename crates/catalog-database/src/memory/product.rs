use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProduct, Product, ProductChanges};

use super::{Tables, next_id};
use crate::repositories::ProductStore;

/// In-memory product repository.
#[derive(Debug, Clone)]
pub struct MemoryProductRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryProductRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

/// Check the unique and foreign key constraints a product row must satisfy.
fn check_constraints(tables: &Tables, product: &Product) -> AppResult<()> {
    let duplicate = tables.products.values().any(|existing| {
        existing.product_id != product.product_id
            && existing.product_number == product.product_number
    });
    if duplicate {
        return Err(AppError::validation(format!(
            "ProductNumber '{}' already exists",
            product.product_number
        )));
    }
    if let Some(category_id) = product.product_category_id {
        if !tables.categories.contains_key(&category_id) {
            return Err(AppError::validation(
                "ProductCategoryID references a category that does not exist",
            ));
        }
    }
    if let Some(model_id) = product.product_model_id {
        if !tables.models.contains_key(&model_id) {
            return Err(AppError::validation(
                "ProductModelID references a product model that does not exist",
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl Repository for MemoryProductRepository {
    type Entity = Product;
    type Id = i32;
    type New = NewProduct;
    type Changes = ProductChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.tables.read().await.products.values().cloned().collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.read().await.products.contains_key(&id))
    }

    async fn create(&self, data: &NewProduct) -> AppResult<Product> {
        let mut tables = self.tables.write().await;
        let id = match data.product_id {
            Some(id) if tables.products.contains_key(&id) => {
                return Err(AppError::validation(format!(
                    "ProductID {id} already exists"
                )));
            }
            Some(id) => id,
            None => next_id(&tables.products, "ProductID")?,
        };
        let product = data.clone().into_record(id);
        check_constraints(&tables, &product)?;
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, changes: &ProductChanges) -> AppResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(mut product) = tables.products.get(&id).cloned() else {
            return Ok(None);
        };
        product.apply(changes);
        check_constraints(&tables, &product)?;
        tables.products.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.products.len() as u64)
    }
}

#[async_trait]
impl ProductStore for MemoryProductRepository {
    async fn find_by_number(&self, product_number: &str) -> AppResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .find(|p| p.product_number == product_number)
            .cloned())
    }

    async fn count_by_category(&self, category_id: i32) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.product_category_id == Some(category_id))
            .count() as u64)
    }

    async fn count_by_model(&self, model_id: i32) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.product_model_id == Some(model_id))
            .count() as u64)
    }
}
