//! Route definitions for the catalog HTTP API.
//!
//! Catalog resources are mounted under `/api`; token issuance and the
//! welcome page sit at the root. Every collection answers with and
//! without a trailing slash.

use axum::Router;
use axum::http::Uri;
use axum::routing::{get, post};

use catalog_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the route table and attach the shared state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(product_routes())
        .merge(category_routes())
        .merge(model_routes());

    Router::new()
        .route("/", get(handlers::health::welcome))
        .route("/token", post(handlers::auth::token))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/test-db", get(handlers::health::test_db))
}

fn product_routes() -> Router<AppState> {
    use handlers::product::*;

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn category_routes() -> Router<AppState> {
    use handlers::category::*;

    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

fn model_routes() -> Router<AppState> {
    use handlers::product_model::*;

    Router::new()
        .route("/models", get(list_models).post(create_model))
        .route("/models/", get(list_models).post(create_model))
        .route(
            "/models/{id}",
            get(get_model).put(update_model).delete(delete_model),
        )
}

async fn route_not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}
