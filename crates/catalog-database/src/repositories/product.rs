//! Product repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{NewProduct, Product, ProductChanges};

use super::{
    FK_PRODUCT_CATEGORY, FK_PRODUCT_MODEL, PK_PRODUCT, ProductStore, UQ_PRODUCT_NUMBER,
    read_error, violated_constraint,
};

/// Repository for product CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Client-facing message for a product constraint violation, if the
/// constraint is one a caller can trip with bad input.
fn violation_message(
    constraint: &str,
    product_id: Option<i32>,
    product_number: Option<&str>,
) -> Option<String> {
    match constraint {
        PK_PRODUCT => Some(match product_id {
            Some(id) => format!("ProductID {id} already exists"),
            None => "ProductID already exists".to_string(),
        }),
        UQ_PRODUCT_NUMBER => Some(match product_number {
            Some(number) => format!("ProductNumber '{number}' already exists"),
            None => "ProductNumber already exists".to_string(),
        }),
        FK_PRODUCT_CATEGORY => {
            Some("ProductCategoryID references a category that does not exist".to_string())
        }
        FK_PRODUCT_MODEL => {
            Some("ProductModelID references a product model that does not exist".to_string())
        }
        _ => None,
    }
}

/// Translate a failed product write into a client or database error.
fn write_error(
    err: sqlx::Error,
    product_id: Option<i32>,
    product_number: Option<&str>,
    context: &str,
) -> AppError {
    let message = violated_constraint(&err)
        .and_then(|(_, constraint)| violation_message(&constraint, product_id, product_number));
    match message {
        Some(message) => AppError::with_source(ErrorKind::Validation, message, err),
        None => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}

#[async_trait]
impl Repository for ProductRepository {
    type Entity = Product;
    type Id = i32;
    type New = NewProduct;
    type Changes = ProductChanges;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(r#"SELECT * FROM "SalesLT"."Product" WHERE "ProductID" = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find product", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(r#"SELECT * FROM "SalesLT"."Product" ORDER BY "ProductID""#)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list products", e))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM "SalesLT"."Product" WHERE "ProductID" = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to check product existence", e))
    }

    async fn create(&self, data: &NewProduct) -> AppResult<Product> {
        let number = Some(data.product_number.as_str());
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| read_error("Failed to begin transaction", e))?;

        let mut query = QueryBuilder::<Postgres>::new(r#"INSERT INTO "SalesLT"."Product" ("#);
        if data.product_id.is_some() {
            query.push(r#""ProductID", "#);
        }
        query.push(
            r#""Name", "ProductNumber", "Color", "StandardCost", "ListPrice", "Size", "Weight",
               "ProductCategoryID", "ProductModelID", "SellStartDate", "SellEndDate",
               "DiscontinuedDate", "ThumbnailPhotoFileName", "rowguid", "ModifiedDate") VALUES ("#,
        );
        let mut values = query.separated(", ");
        if let Some(product_id) = data.product_id {
            values.push_bind(product_id);
        }
        values
            .push_bind(data.name.clone())
            .push_bind(data.product_number.clone())
            .push_bind(data.color.clone())
            .push_bind(data.standard_cost)
            .push_bind(data.list_price)
            .push_bind(data.size.clone())
            .push_bind(data.weight)
            .push_bind(data.product_category_id)
            .push_bind(data.product_model_id)
            .push_bind(data.sell_start_date)
            .push_bind(data.sell_end_date)
            .push_bind(data.discontinued_date)
            .push_bind(data.thumbnail_photo_file_name.clone())
            .push_bind(data.rowguid)
            .push_bind(data.modified_date);
        values.push_unseparated(") RETURNING *");

        let product = query
            .build_query_as::<Product>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(e, data.product_id, number, "Failed to create product"))?;

        if data.product_id.is_some() {
            // An explicit id bypasses the identity sequence; move it past the max.
            sqlx::query(
                r#"SELECT setval(pg_get_serial_sequence('"SalesLT"."Product"', 'ProductID'),
                                 (SELECT MAX("ProductID") FROM "SalesLT"."Product"))"#,
            )
            .execute(&mut *tx)
            .await
            .map_err(|e| read_error("Failed to advance product id sequence", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| write_error(e, data.product_id, number, "Failed to commit product"))?;

        debug!(product_id = product.product_id, "Inserted product row");
        Ok(product)
    }

    async fn update(&self, id: i32, changes: &ProductChanges) -> AppResult<Option<Product>> {
        let mut query =
            QueryBuilder::<Postgres>::new(r#"UPDATE "SalesLT"."Product" SET "ModifiedDate" = "#);
        query.push_bind(changes.modified_date);

        if let Some(name) = &changes.name {
            query.push(r#", "Name" = "#).push_bind(name.clone());
        }
        if let Some(product_number) = &changes.product_number {
            query
                .push(r#", "ProductNumber" = "#)
                .push_bind(product_number.clone());
        }
        if let Some(color) = &changes.color {
            query.push(r#", "Color" = "#).push_bind(color.clone());
        }
        if let Some(standard_cost) = changes.standard_cost {
            query.push(r#", "StandardCost" = "#).push_bind(standard_cost);
        }
        if let Some(list_price) = changes.list_price {
            query.push(r#", "ListPrice" = "#).push_bind(list_price);
        }
        if let Some(size) = &changes.size {
            query.push(r#", "Size" = "#).push_bind(size.clone());
        }
        if let Some(weight) = changes.weight {
            query.push(r#", "Weight" = "#).push_bind(weight);
        }
        if let Some(category_id) = changes.product_category_id {
            query
                .push(r#", "ProductCategoryID" = "#)
                .push_bind(category_id);
        }
        if let Some(model_id) = changes.product_model_id {
            query.push(r#", "ProductModelID" = "#).push_bind(model_id);
        }
        if let Some(sell_start_date) = changes.sell_start_date {
            query
                .push(r#", "SellStartDate" = "#)
                .push_bind(sell_start_date);
        }
        if let Some(sell_end_date) = changes.sell_end_date {
            query.push(r#", "SellEndDate" = "#).push_bind(sell_end_date);
        }
        if let Some(discontinued_date) = changes.discontinued_date {
            query
                .push(r#", "DiscontinuedDate" = "#)
                .push_bind(discontinued_date);
        }
        if let Some(file_name) = &changes.thumbnail_photo_file_name {
            query
                .push(r#", "ThumbnailPhotoFileName" = "#)
                .push_bind(file_name.clone());
        }
        if let Some(rowguid) = changes.rowguid {
            query.push(r#", "rowguid" = "#).push_bind(rowguid);
        }

        query.push(r#" WHERE "ProductID" = "#).push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    Some(id),
                    changes.product_number.as_deref(),
                    "Failed to update product",
                )
            })
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM "SalesLT"."Product" WHERE "ProductID" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error("Failed to delete product", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "SalesLT"."Product""#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count products", e))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_number(&self, product_number: &str) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"SELECT * FROM "SalesLT"."Product" WHERE "ProductNumber" = $1"#,
        )
        .bind(product_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("Failed to find product by number", e))
    }

    async fn count_by_category(&self, category_id: i32) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM "SalesLT"."Product" WHERE "ProductCategoryID" = $1"#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to count products by category", e))?;
        Ok(total as u64)
    }

    async fn count_by_model(&self, model_id: i32) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM "SalesLT"."Product" WHERE "ProductModelID" = $1"#,
        )
        .bind(model_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to count products by model", e))?;
        Ok(total as u64)
    }
}
