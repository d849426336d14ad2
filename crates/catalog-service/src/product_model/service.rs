//! Product model CRUD operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_database::{ModelStore, ProductStore};
use catalog_entity::{NewProductModel, ProductModel, ProductModelChanges};

use crate::context::RequestContext;
use crate::validation::{parse_optional_timestamp, require_non_blank};

/// Manages product models.
#[derive(Clone)]
pub struct ModelService {
    models: Arc<dyn ModelStore>,
    products: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for ModelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelService").finish_non_exhaustive()
    }
}

/// Request to create a product model.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateModelRequest {
    pub name: String,
    pub description: Option<String>,
    pub rowguid: Option<Uuid>,
    pub modified_date: Option<String>,
}

/// Request to change a product model.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateModelRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub modified_date: Option<String>,
}

impl ModelService {
    /// Creates a new model service.
    pub fn new(models: Arc<dyn ModelStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { models, products }
    }

    /// Lists all product models ordered by ID.
    pub async fn list_models(&self, _ctx: &RequestContext) -> AppResult<Vec<ProductModel>> {
        self.models.find_all().await
    }

    /// Gets a product model by ID.
    pub async fn get_model(&self, _ctx: &RequestContext, model_id: i32) -> AppResult<ProductModel> {
        self.models
            .find_by_id(model_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product model {model_id} not found")))
    }

    /// Creates a product model.
    pub async fn create_model(
        &self,
        ctx: &RequestContext,
        req: CreateModelRequest,
    ) -> AppResult<ProductModel> {
        require_non_blank("Name", &req.name)?;
        let modified_date = parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?
            .unwrap_or_else(Utc::now);

        let model = self
            .models
            .create(&NewProductModel {
                name: req.name,
                description: req.description,
                rowguid: req.rowguid.unwrap_or_else(Uuid::new_v4),
                modified_date,
            })
            .await?;

        info!(user = %ctx.username, model_id = model.product_model_id, "Product model created");

        Ok(model)
    }

    /// Applies a partial update to a product model.
    pub async fn update_model(
        &self,
        ctx: &RequestContext,
        model_id: i32,
        req: UpdateModelRequest,
    ) -> AppResult<ProductModel> {
        if let Some(name) = &req.name {
            require_non_blank("Name", name)?;
        }
        let modified_date = parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?
            .unwrap_or_else(Utc::now);

        let changes = ProductModelChanges {
            name: req.name,
            description: req.description,
            modified_date,
        };
        let model = self
            .models
            .update(model_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product model {model_id} not found")))?;

        info!(user = %ctx.username, model_id, "Product model updated");

        Ok(model)
    }

    /// Deletes a product model no product references.
    pub async fn delete_model(&self, ctx: &RequestContext, model_id: i32) -> AppResult<()> {
        self.get_model(ctx, model_id).await?;

        let products = self.products.count_by_model(model_id).await?;
        if products > 0 {
            return Err(AppError::conflict(format!(
                "Product model {model_id} is still referenced by {products} product(s)"
            )));
        }

        if !self.models.delete(model_id).await? {
            return Err(AppError::not_found(format!("Product model {model_id} not found")));
        }

        info!(user = %ctx.username, model_id, "Product model deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::error::ErrorKind;
    use catalog_database::memory::MemoryCatalog;

    use super::*;
    use crate::product::{CreateProductRequest, ProductService};

    #[tokio::test]
    async fn test_model_lifecycle_and_restricted_delete() {
        let catalog = MemoryCatalog::new();
        let products = Arc::new(catalog.products());
        let models = Arc::new(catalog.models());
        let service = ModelService::new(models.clone(), products.clone());
        let product_service =
            ProductService::new(products, Arc::new(catalog.categories()), models);
        let ctx = RequestContext::system();

        let model = service
            .create_model(
                &ctx,
                CreateModelRequest {
                    name: "Mountain-100".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let renamed = service
            .update_model(
                &ctx,
                model.product_model_id,
                UpdateModelRequest {
                    description: Some(Some("Flagship".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Mountain-100");
        assert_eq!(renamed.description.as_deref(), Some("Flagship"));

        product_service
            .create_product(
                &ctx,
                CreateProductRequest {
                    name: "Mountain-100 Black, 38".to_string(),
                    product_number: "BK-M82B-38".to_string(),
                    list_price: 3374.99,
                    product_model_id: Some(model.product_model_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = service
            .delete_model(&ctx, model.product_model_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_missing_model_is_not_found() {
        let catalog = MemoryCatalog::new();
        let service = ModelService::new(Arc::new(catalog.models()), Arc::new(catalog.products()));
        let ctx = RequestContext::system();
        assert_eq!(
            service.get_model(&ctx, 3).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service
                .update_model(&ctx, 3, UpdateModelRequest::default())
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete_model(&ctx, 3).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
