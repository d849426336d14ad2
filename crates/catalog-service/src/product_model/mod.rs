//! Product model use cases.

pub mod service;

pub use service::{CreateModelRequest, ModelService, UpdateModelRequest};
