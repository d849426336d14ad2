//! Product model repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProductModel, ProductModel, ProductModelChanges};

use super::{read_error, violated_constraint};

/// Repository for product model CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductModelRepository {
    pool: PgPool,
}

impl ProductModelRepository {
    /// Create a new product model repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ProductModelRepository {
    type Entity = ProductModel;
    type Id = i32;
    type New = NewProductModel;
    type Changes = ProductModelChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductModel>> {
        sqlx::query_as::<_, ProductModel>(
            r#"SELECT * FROM "SalesLT"."ProductModel" WHERE "ProductModelID" = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("Failed to find product model", e))
    }

    async fn find_all(&self) -> AppResult<Vec<ProductModel>> {
        sqlx::query_as::<_, ProductModel>(
            r#"SELECT * FROM "SalesLT"."ProductModel" ORDER BY "ProductModelID""#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to list product models", e))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM "SalesLT"."ProductModel" WHERE "ProductModelID" = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to check product model existence", e))
    }

    async fn create(&self, data: &NewProductModel) -> AppResult<ProductModel> {
        sqlx::query_as::<_, ProductModel>(
            r#"INSERT INTO "SalesLT"."ProductModel" ("Name", "Description", "rowguid", "ModifiedDate")
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.rowguid)
        .bind(data.modified_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to create product model", e))
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductModelChanges,
    ) -> AppResult<Option<ProductModel>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"UPDATE "SalesLT"."ProductModel" SET "ModifiedDate" = "#,
        );
        query.push_bind(changes.modified_date);
        if let Some(name) = &changes.name {
            query.push(r#", "Name" = "#).push_bind(name.clone());
        }
        if let Some(description) = &changes.description {
            query
                .push(r#", "Description" = "#)
                .push_bind(description.clone());
        }
        query.push(r#" WHERE "ProductModelID" = "#).push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<ProductModel>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to update product model", e))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result =
            sqlx::query(r#"DELETE FROM "SalesLT"."ProductModel" WHERE "ProductModelID" = $1"#)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| match violated_constraint(&e) {
                    Some((sqlx::error::ErrorKind::ForeignKeyViolation, _)) => {
                        AppError::with_source(
                            ErrorKind::Conflict,
                            format!("Product model {id} is still referenced by products"),
                            e,
                        )
                    }
                    _ => read_error("Failed to delete product model", e),
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "SalesLT"."ProductModel""#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count product models", e))?;
        Ok(total as u64)
    }
}
