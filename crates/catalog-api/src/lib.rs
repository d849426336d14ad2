//! # catalog-api
//!
//! HTTP API layer for the catalog built on Axum.
//!
//! Provides the REST endpoints, the bearer-token extractor, request/response
//! DTOs, middleware (logging, CORS) and the mapping from [`AppError`] to
//! HTTP status codes.
//!
//! [`AppError`]: catalog_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
