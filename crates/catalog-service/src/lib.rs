//! # catalog-service
//!
//! Business logic service layer for the catalog. Each service validates a
//! request, checks the references it makes and hands the resolved write
//! model to the repositories.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod category;
pub mod context;
pub mod product;
pub mod product_model;
pub mod validation;

pub use category::{CategoryService, CreateCategoryRequest, UpdateCategoryRequest};
pub use context::RequestContext;
pub use product::{CreateProductRequest, ProductService, UpdateProductRequest};
pub use product_model::{CreateModelRequest, ModelService, UpdateModelRequest};
