//! # catalog-entity
//!
//! Entity models for the `SalesLT` catalog schema. Every record struct
//! represents one table row and derives `sqlx::FromRow`; its serde field
//! names are the column names, so the wire format and the schema agree.
//!
//! Each table also has two write models: `New*` (a fully-resolved insert)
//! and `*Changes` (a partial update where `None` means "leave untouched").

pub mod category;
pub mod product;
pub mod product_model;

pub use category::{NewProductCategory, ProductCategory, ProductCategoryChanges};
pub use product_model::{NewProductModel, ProductModel, ProductModelChanges};
pub use product::{NewProduct, Product, ProductChanges};
