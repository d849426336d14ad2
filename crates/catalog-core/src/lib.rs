//! # catalog-core
//!
//! Core crate for the AdventureWorks catalog service. Contains the
//! configuration schema, the generic repository trait and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
