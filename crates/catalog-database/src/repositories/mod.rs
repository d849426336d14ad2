//! PostgreSQL repository implementations for the catalog tables, and the
//! store traits the service layer programs against.

pub mod category;
pub mod product;
pub mod product_model;

use async_trait::async_trait;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_entity::{
    NewProduct, NewProductCategory, NewProductModel, Product, ProductCategory,
    ProductCategoryChanges, ProductChanges, ProductModel, ProductModelChanges,
};

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use product_model::ProductModelRepository;

/// Persistence gateway for `SalesLT.Product`.
#[async_trait]
pub trait ProductStore:
    Repository<Entity = Product, Id = i32, New = NewProduct, Changes = ProductChanges>
{
    /// Find a product by its unique product number.
    async fn find_by_number(&self, product_number: &str) -> AppResult<Option<Product>>;

    /// Count products that reference a category.
    async fn count_by_category(&self, category_id: i32) -> AppResult<u64>;

    /// Count products that reference a product model.
    async fn count_by_model(&self, model_id: i32) -> AppResult<u64>;
}

/// Persistence gateway for `SalesLT.ProductCategory`.
#[async_trait]
pub trait CategoryStore:
    Repository<
        Entity = ProductCategory,
        Id = i32,
        New = NewProductCategory,
        Changes = ProductCategoryChanges,
    >
{
    /// Count categories whose parent is `category_id`.
    async fn count_children(&self, category_id: i32) -> AppResult<u64>;
}

/// Persistence gateway for `SalesLT.ProductModel`.
pub trait ModelStore:
    Repository<Entity = ProductModel, Id = i32, New = NewProductModel, Changes = ProductModelChanges>
{
}

impl<T> ModelStore for T where
    T: Repository<
            Entity = ProductModel,
            Id = i32,
            New = NewProductModel,
            Changes = ProductModelChanges,
        >
{
}

// Constraint names declared in migrations/.
pub(crate) const PK_PRODUCT: &str = "pk_product";
pub(crate) const UQ_PRODUCT_NUMBER: &str = "uq_product_product_number";
pub(crate) const FK_PRODUCT_CATEGORY: &str = "fk_product_product_category";
pub(crate) const FK_PRODUCT_MODEL: &str = "fk_product_product_model";
pub(crate) const FK_CATEGORY_PARENT: &str = "fk_product_category_parent";

/// Wrap a failed read as a database error.
pub(crate) fn read_error(context: &str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

/// The constraint a failed statement tripped, if the database reported one.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<(sqlx::error::ErrorKind, String)> {
    let db_err = err.as_database_error()?;
    match db_err.kind() {
        kind @ (sqlx::error::ErrorKind::UniqueViolation
        | sqlx::error::ErrorKind::ForeignKeyViolation) => {
            Some((kind, db_err.constraint().unwrap_or_default().to_string()))
        }
        _ => None,
    }
}
