//! Product model domain entities.

pub mod model;

pub use model::{NewProductModel, ProductModel, ProductModelChanges};
