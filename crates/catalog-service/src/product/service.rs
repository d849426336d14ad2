//! Product CRUD operations with reference and date validation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_database::{CategoryStore, ModelStore, ProductStore};
use catalog_entity::{NewProduct, Product, ProductChanges};

use crate::context::RequestContext;
use crate::validation::{
    ensure_category_exists, ensure_model_exists, parse_optional_timestamp, parse_timestamp_change,
    require_non_blank,
};

/// Manages product CRUD operations.
#[derive(Clone)]
pub struct ProductService {
    /// Product repository.
    products: Arc<dyn ProductStore>,
    /// Category repository, for `ProductCategoryID` checks.
    categories: Arc<dyn CategoryStore>,
    /// Product model repository, for `ProductModelID` checks.
    models: Arc<dyn ModelStore>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

/// Request to create a product.
///
/// Dates arrive as strings and are parsed here so that a bad value can be
/// reported with its field name.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateProductRequest {
    /// Client-chosen ID; generated when absent.
    pub product_id: Option<i32>,
    pub name: String,
    pub product_number: String,
    pub color: Option<String>,
    pub standard_cost: Option<f64>,
    pub list_price: f64,
    pub size: Option<String>,
    pub weight: Option<f64>,
    pub product_category_id: Option<i32>,
    pub product_model_id: Option<i32>,
    /// Defaults to the creation time.
    pub sell_start_date: Option<String>,
    pub sell_end_date: Option<String>,
    pub discontinued_date: Option<String>,
    pub thumbnail_photo_file_name: Option<String>,
    /// Generated when absent.
    pub rowguid: Option<Uuid>,
    /// Defaults to the creation time.
    pub modified_date: Option<String>,
}

/// Request to change some fields of a product.
///
/// `None` leaves a field alone. On nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub product_number: Option<String>,
    pub color: Option<Option<String>>,
    pub standard_cost: Option<Option<f64>>,
    pub list_price: Option<f64>,
    pub size: Option<Option<String>>,
    pub weight: Option<Option<f64>>,
    pub product_category_id: Option<Option<i32>>,
    pub product_model_id: Option<Option<i32>>,
    pub sell_start_date: Option<String>,
    pub sell_end_date: Option<Option<String>>,
    pub discontinued_date: Option<Option<String>>,
    pub thumbnail_photo_file_name: Option<Option<String>>,
    pub rowguid: Option<Uuid>,
    /// Set to the update time when absent.
    pub modified_date: Option<String>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        models: Arc<dyn ModelStore>,
    ) -> Self {
        Self {
            products,
            categories,
            models,
        }
    }

    /// Lists every product ordered by ID.
    pub async fn list_products(&self, _ctx: &RequestContext) -> AppResult<Vec<Product>> {
        self.products.find_all().await
    }

    /// Gets a product by ID.
    pub async fn get_product(&self, _ctx: &RequestContext, product_id: i32) -> AppResult<Product> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))
    }

    /// Creates a product after validating dates and references.
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        req: CreateProductRequest,
    ) -> AppResult<Product> {
        require_non_blank("Name", &req.name)?;
        require_non_blank("ProductNumber", &req.product_number)?;

        let now = Utc::now();
        let sell_start_date =
            parse_optional_timestamp("SellStartDate", req.sell_start_date.as_deref())?
                .unwrap_or(now);
        let sell_end_date = parse_optional_timestamp("SellEndDate", req.sell_end_date.as_deref())?;
        let discontinued_date =
            parse_optional_timestamp("DiscontinuedDate", req.discontinued_date.as_deref())?;
        let modified_date =
            parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?.unwrap_or(now);

        self.check_references(req.product_category_id, req.product_model_id)
            .await?;

        if let Some(product_id) = req.product_id {
            if self.products.exists(product_id).await? {
                return Err(AppError::validation(format!(
                    "ProductID {product_id} already exists"
                )));
            }
        }
        self.ensure_number_free(&req.product_number, None).await?;

        let data = NewProduct {
            product_id: req.product_id,
            name: req.name,
            product_number: req.product_number,
            color: req.color,
            standard_cost: req.standard_cost,
            list_price: req.list_price,
            size: req.size,
            weight: req.weight,
            product_category_id: req.product_category_id,
            product_model_id: req.product_model_id,
            sell_start_date,
            sell_end_date,
            discontinued_date,
            thumbnail_photo_file_name: req.thumbnail_photo_file_name,
            rowguid: req.rowguid.unwrap_or_else(Uuid::new_v4),
            modified_date,
        };

        let product = self.products.create(&data).await?;

        info!(
            user = %ctx.username,
            product_id = product.product_id,
            product_number = %product.product_number,
            "Product created"
        );

        Ok(product)
    }

    /// Applies a partial update to a product.
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        product_id: i32,
        req: UpdateProductRequest,
    ) -> AppResult<Product> {
        let current = self.get_product(ctx, product_id).await?;

        if let Some(name) = &req.name {
            require_non_blank("Name", name)?;
        }
        if let Some(number) = &req.product_number {
            require_non_blank("ProductNumber", number)?;
            if *number != current.product_number {
                self.ensure_number_free(number, Some(product_id)).await?;
            }
        }

        let sell_start_date =
            parse_optional_timestamp("SellStartDate", req.sell_start_date.as_deref())?;
        let sell_end_date =
            parse_timestamp_change("SellEndDate", req.sell_end_date.as_ref().map(Option::as_deref))?;
        let discontinued_date = parse_timestamp_change(
            "DiscontinuedDate",
            req.discontinued_date.as_ref().map(Option::as_deref),
        )?;
        let modified_date = parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?
            .unwrap_or_else(Utc::now);

        self.check_references(req.product_category_id.flatten(), req.product_model_id.flatten())
            .await?;

        let changes = ProductChanges {
            name: req.name,
            product_number: req.product_number,
            color: req.color,
            standard_cost: req.standard_cost,
            list_price: req.list_price,
            size: req.size,
            weight: req.weight,
            product_category_id: req.product_category_id,
            product_model_id: req.product_model_id,
            sell_start_date,
            sell_end_date,
            discontinued_date,
            thumbnail_photo_file_name: req.thumbnail_photo_file_name,
            rowguid: req.rowguid,
            modified_date,
        };

        let product = self
            .products
            .update(product_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))?;

        info!(user = %ctx.username, product_id, "Product updated");

        Ok(product)
    }

    /// Deletes a product.
    pub async fn delete_product(&self, ctx: &RequestContext, product_id: i32) -> AppResult<()> {
        if !self.products.delete(product_id).await? {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }

        info!(user = %ctx.username, product_id, "Product deleted");

        Ok(())
    }

    async fn check_references(&self, category_id: Option<i32>, model_id: Option<i32>) -> AppResult<()> {
        if let Some(category_id) = category_id {
            ensure_category_exists(self.categories.as_ref(), "ProductCategoryID", category_id)
                .await?;
        }
        if let Some(model_id) = model_id {
            ensure_model_exists(self.models.as_ref(), "ProductModelID", model_id).await?;
        }
        Ok(())
    }

    async fn ensure_number_free(&self, number: &str, owner: Option<i32>) -> AppResult<()> {
        match self.products.find_by_number(number).await? {
            Some(existing) if Some(existing.product_id) != owner => Err(AppError::validation(
                format!("ProductNumber '{number}' already exists"),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::error::ErrorKind;
    use catalog_database::memory::MemoryCatalog;
    use catalog_entity::NewProductCategory;

    use super::*;

    fn service() -> (ProductService, MemoryCatalog) {
        let catalog = MemoryCatalog::new();
        let service = ProductService::new(
            Arc::new(catalog.products()),
            Arc::new(catalog.categories()),
            Arc::new(catalog.models()),
        );
        (service, catalog)
    }

    fn widget() -> CreateProductRequest {
        CreateProductRequest {
            name: "Widget".to_string(),
            product_number: "W-100".to_string(),
            list_price: 9.99,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_generates_columns() {
        let (service, _) = service();
        let ctx = RequestContext::system();
        let before = Utc::now();

        let product = service.create_product(&ctx, widget()).await.unwrap();
        assert_eq!(product.product_id, 1);
        assert_eq!(product.name, "Widget");
        assert!(product.sell_start_date >= before);
        assert!(product.modified_date >= before);
        assert_ne!(product.rowguid, Uuid::nil());

        let fetched = service.get_product(&ctx, product.product_id).await.unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_dates_and_id() {
        let (service, _) = service();
        let ctx = RequestContext::system();
        let req = CreateProductRequest {
            product_id: Some(680),
            sell_start_date: Some("2002-06-01T00:00:00".to_string()),
            sell_end_date: Some("2003-06-30".to_string()),
            ..widget()
        };

        let product = service.create_product(&ctx, req).await.unwrap();
        assert_eq!(product.product_id, 680);
        assert_eq!(product.sell_start_date.to_rfc3339(), "2002-06-01T00:00:00+00:00");
        assert!(product.sell_end_date.is_some());

        let again = CreateProductRequest {
            product_id: Some(680),
            product_number: "W-101".to_string(),
            ..widget()
        };
        let err = service.create_product(&ctx, again).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("680"));
    }

    #[tokio::test]
    async fn test_bad_date_names_field() {
        let (service, _) = service();
        let req = CreateProductRequest {
            discontinued_date: Some("not-a-date".to_string()),
            ..widget()
        };
        let err = service
            .create_product(&RequestContext::system(), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("DiscontinuedDate"));
        assert!(err.message.contains("not-a-date"));
    }

    #[tokio::test]
    async fn test_missing_category_rejected_existing_accepted() {
        let (service, catalog) = service();
        let ctx = RequestContext::system();
        let req = CreateProductRequest {
            product_category_id: Some(99),
            ..widget()
        };
        let err = service.create_product(&ctx, req.clone()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("ProductCategoryID"));
        assert!(err.message.contains("99"));

        let category = catalog
            .categories()
            .create(&NewProductCategory {
                parent_product_category_id: None,
                name: "Bikes".to_string(),
                rowguid: Uuid::new_v4(),
                modified_date: Utc::now(),
            })
            .await
            .unwrap();
        let req = CreateProductRequest {
            product_category_id: Some(category.product_category_id),
            ..widget()
        };
        let product = service.create_product(&ctx, req).await.unwrap();
        assert_eq!(product.product_category_id, Some(category.product_category_id));
    }

    #[tokio::test]
    async fn test_duplicate_number_never_creates_two_rows() {
        let (service, catalog) = service();
        let ctx = RequestContext::system();
        service.create_product(&ctx, widget()).await.unwrap();
        let err = service.create_product(&ctx, widget()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(catalog.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let (service, _) = service();
        let ctx = RequestContext::system();
        let created = service
            .create_product(
                &ctx,
                CreateProductRequest {
                    color: Some("Blue".to_string()),
                    ..widget()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_product(
                &ctx,
                created.product_id,
                UpdateProductRequest {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "X");
        assert_eq!(updated.product_number, created.product_number);
        assert_eq!(updated.color, created.color);
        assert_eq!(updated.list_price, created.list_price);
        assert_eq!(updated.rowguid, created.rowguid);
        assert!(updated.modified_date >= created.modified_date);

        let cleared = service
            .update_product(
                &ctx,
                created.product_id,
                UpdateProductRequest {
                    color: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.color.is_none());
        assert_eq!(cleared.name, "X");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, _) = service();
        let err = service
            .update_product(&RequestContext::system(), 5, UpdateProductRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_keeping_own_number_is_allowed() {
        let (service, _) = service();
        let ctx = RequestContext::system();
        let created = service.create_product(&ctx, widget()).await.unwrap();
        let updated = service
            .update_product(
                &ctx,
                created.product_id,
                UpdateProductRequest {
                    product_number: Some("W-100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.product_number, "W-100");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _) = service();
        let ctx = RequestContext::system();
        let created = service.create_product(&ctx, widget()).await.unwrap();
        service
            .delete_product(&ctx, created.product_id)
            .await
            .unwrap();

        let err = service
            .get_product(&ctx, created.product_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = service
            .delete_product(&ctx, created.product_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_empty_catalog_lists_nothing() {
        let (service, _) = service();
        let products = service
            .list_products(&RequestContext::system())
            .await
            .unwrap();
        assert!(products.is_empty());
    }
}
