//! Product category repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProductCategory, ProductCategory, ProductCategoryChanges};

use super::{CategoryStore, FK_CATEGORY_PARENT, read_error, violated_constraint};

/// Repository for product category CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for CategoryRepository {
    type Entity = ProductCategory;
    type Id = i32;
    type New = NewProductCategory;
    type Changes = ProductCategoryChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductCategory>> {
        sqlx::query_as::<_, ProductCategory>(
            r#"SELECT * FROM "SalesLT"."ProductCategory" WHERE "ProductCategoryID" = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("Failed to find category", e))
    }

    async fn find_all(&self) -> AppResult<Vec<ProductCategory>> {
        sqlx::query_as::<_, ProductCategory>(
            r#"SELECT * FROM "SalesLT"."ProductCategory" ORDER BY "ProductCategoryID""#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to list categories", e))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM "SalesLT"."ProductCategory" WHERE "ProductCategoryID" = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to check category existence", e))
    }

    async fn create(&self, data: &NewProductCategory) -> AppResult<ProductCategory> {
        sqlx::query_as::<_, ProductCategory>(
            r#"INSERT INTO "SalesLT"."ProductCategory"
                   ("ParentProductCategoryID", "Name", "rowguid", "ModifiedDate")
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(data.parent_product_category_id)
        .bind(&data.name)
        .bind(data.rowguid)
        .bind(data.modified_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create category"))
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductCategoryChanges,
    ) -> AppResult<Option<ProductCategory>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"UPDATE "SalesLT"."ProductCategory" SET "ModifiedDate" = "#,
        );
        query.push_bind(changes.modified_date);
        if let Some(name) = &changes.name {
            query.push(r#", "Name" = "#).push_bind(name.clone());
        }
        if let Some(parent) = changes.parent_product_category_id {
            query
                .push(r#", "ParentProductCategoryID" = "#)
                .push_bind(parent);
        }
        query.push(r#" WHERE "ProductCategoryID" = "#).push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<ProductCategory>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update category"))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"DELETE FROM "SalesLT"."ProductCategory" WHERE "ProductCategoryID" = $1"#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some((sqlx::error::ErrorKind::ForeignKeyViolation, _)) => AppError::with_source(
                ErrorKind::Conflict,
                format!("Category {id} is still referenced by products or subcategories"),
                e,
            ),
            _ => read_error("Failed to delete category", e),
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "SalesLT"."ProductCategory""#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count categories", e))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn count_children(&self, category_id: i32) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM "SalesLT"."ProductCategory" WHERE "ParentProductCategoryID" = $1"#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to count subcategories", e))?;
        Ok(total as u64)
    }
}

fn write_error(err: sqlx::Error, context: &str) -> AppError {
    match violated_constraint(&err) {
        Some((_, constraint)) if constraint == FK_CATEGORY_PARENT => AppError::with_source(
            ErrorKind::Validation,
            "ParentProductCategoryID references a category that does not exist",
            err,
        ),
        _ => read_error(context, err),
    }
}
