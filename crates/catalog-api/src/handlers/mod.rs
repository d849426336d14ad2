//! HTTP request handlers organized by resource.

pub mod auth;
pub mod category;
pub mod health;
pub mod product;
pub mod product_model;
