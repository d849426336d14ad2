//! Custom Axum extractors.

pub mod auth;
pub mod form;
pub mod json;
pub mod path;

pub use auth::AuthUser;
pub use form::LoginForm;
pub use json::ValidatedJson;
pub use path::EntityId;
