//! Product category CRUD operations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_database::{CategoryStore, ProductStore};
use catalog_entity::{NewProductCategory, ProductCategory, ProductCategoryChanges};

use crate::context::RequestContext;
use crate::validation::{ensure_category_exists, parse_optional_timestamp, require_non_blank};

const PARENT_FIELD: &str = "ParentProductCategoryID";

/// Manages the category tree.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    /// Consulted before deletes.
    products: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").finish_non_exhaustive()
    }
}

/// Request to create a category.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_product_category_id: Option<i32>,
    pub rowguid: Option<Uuid>,
    pub modified_date: Option<String>,
}

/// Request to change a category; `Some(None)` on the parent detaches it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub parent_product_category_id: Option<Option<i32>>,
    pub modified_date: Option<String>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryStore>, products: Arc<dyn ProductStore>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Lists all categories ordered by ID.
    pub async fn list_categories(&self, _ctx: &RequestContext) -> AppResult<Vec<ProductCategory>> {
        self.categories.find_all().await
    }

    /// Gets a category by ID.
    pub async fn get_category(
        &self,
        _ctx: &RequestContext,
        category_id: i32,
    ) -> AppResult<ProductCategory> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {category_id} not found")))
    }

    /// Creates a category, optionally under an existing parent.
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        req: CreateCategoryRequest,
    ) -> AppResult<ProductCategory> {
        require_non_blank("Name", &req.name)?;
        let modified_date = parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?
            .unwrap_or_else(Utc::now);
        if let Some(parent_id) = req.parent_product_category_id {
            ensure_category_exists(self.categories.as_ref(), PARENT_FIELD, parent_id).await?;
        }

        let category = self
            .categories
            .create(&NewProductCategory {
                parent_product_category_id: req.parent_product_category_id,
                name: req.name,
                rowguid: req.rowguid.unwrap_or_else(Uuid::new_v4),
                modified_date,
            })
            .await?;

        info!(
            user = %ctx.username,
            category_id = category.product_category_id,
            "Category created"
        );

        Ok(category)
    }

    /// Renames or re-parents a category.
    ///
    /// A category may not become its own ancestor.
    pub async fn update_category(
        &self,
        ctx: &RequestContext,
        category_id: i32,
        req: UpdateCategoryRequest,
    ) -> AppResult<ProductCategory> {
        self.get_category(ctx, category_id).await?;

        if let Some(name) = &req.name {
            require_non_blank("Name", name)?;
        }
        let modified_date = parse_optional_timestamp("ModifiedDate", req.modified_date.as_deref())?
            .unwrap_or_else(Utc::now);
        if let Some(Some(parent_id)) = req.parent_product_category_id {
            self.check_parent(category_id, parent_id).await?;
        }

        let changes = ProductCategoryChanges {
            name: req.name,
            parent_product_category_id: req.parent_product_category_id,
            modified_date,
        };
        let category = self
            .categories
            .update(category_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {category_id} not found")))?;

        info!(user = %ctx.username, category_id, "Category updated");

        Ok(category)
    }

    /// Deletes a category that nothing references.
    pub async fn delete_category(&self, ctx: &RequestContext, category_id: i32) -> AppResult<()> {
        self.get_category(ctx, category_id).await?;

        let products = self.products.count_by_category(category_id).await?;
        if products > 0 {
            return Err(AppError::conflict(format!(
                "Category {category_id} is still referenced by {products} product(s)"
            )));
        }
        let children = self.categories.count_children(category_id).await?;
        if children > 0 {
            return Err(AppError::conflict(format!(
                "Category {category_id} still has {children} subcategor(ies)"
            )));
        }

        if !self.categories.delete(category_id).await? {
            return Err(AppError::not_found(format!("Category {category_id} not found")));
        }

        info!(user = %ctx.username, category_id, "Category deleted");

        Ok(())
    }

    /// Walk up from the proposed parent; reaching `category_id` means a cycle.
    async fn check_parent(&self, category_id: i32, parent_id: i32) -> AppResult<()> {
        if parent_id == category_id {
            return Err(AppError::validation(format!(
                "{PARENT_FIELD} {parent_id} cannot reference the category itself"
            )));
        }

        let mut seen = HashSet::new();
        let mut cursor = Some(parent_id);
        while let Some(id) = cursor {
            if id == category_id {
                return Err(AppError::validation(format!(
                    "{PARENT_FIELD} {parent_id} is a descendant of category {category_id}"
                )));
            }
            if !seen.insert(id) {
                break;
            }
            cursor = match self.categories.find_by_id(id).await? {
                Some(category) => category.parent_product_category_id,
                None if id == parent_id => {
                    return Err(AppError::validation(format!(
                        "{PARENT_FIELD} {parent_id} does not reference an existing product category"
                    )));
                }
                None => None,
            };
        }
        Ok(())
    }
}
