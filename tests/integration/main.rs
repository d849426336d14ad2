//! End-to-end tests driving the full router against the in-memory catalog.

mod helpers;

mod auth_test;
mod category_test;
mod model_test;
mod product_test;
