//! Product category use cases.

pub mod service;

pub use service::{CategoryService, CreateCategoryRequest, UpdateCategoryRequest};
