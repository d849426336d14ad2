//! Product category domain entities.

pub mod model;

pub use model::{NewProductCategory, ProductCategory, ProductCategoryChanges};
