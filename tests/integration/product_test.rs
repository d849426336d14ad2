//! Integration tests for product CRUD.

use http::StatusCode;
use serde_json::json;

use catalog_core::traits::Repository;

use crate::helpers::TestApp;

fn widget() -> serde_json::Value {
    json!({
        "Name": "Widget",
        "ProductNumber": "W-100",
        "ListPrice": 9.99
    })
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app.create_product(&token, widget()).await;
    let id = created["ProductID"].as_i64().expect("generated ProductID");
    assert_eq!(created["Name"], "Widget");
    assert_eq!(created["ProductNumber"], "W-100");
    assert_eq!(created["ListPrice"], 9.99);
    assert!(created["rowguid"].is_string());
    assert!(created["ModifiedDate"].is_string());
    assert!(created["SellStartDate"].is_string());
    assert!(created["Color"].is_null());

    let path = format!("/api/products/{id}");
    let fetched = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created);

    let updated = app
        .request("PUT", &path, Some(json!({ "Color": "Red" })), Some(&token))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["Color"], "Red");
    assert_eq!(updated.body["Name"], "Widget");
    assert_eq!(updated.body["ProductNumber"], "W-100");
    assert_eq!(updated.body["rowguid"], created["rowguid"]);

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_with_and_without_trailing_slash() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let empty = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body, json!([]));

    app.create_product(&token, widget()).await;

    let slash = app.request("GET", "/api/products/", None, Some(&token)).await;
    assert_eq!(slash.status, StatusCode::OK);
    assert_eq!(slash.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_products_require_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/products", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(
        response.headers.get("www-authenticate").map(|v| v.as_bytes()),
        Some(b"Bearer".as_slice())
    );
}

#[tokio::test]
async fn test_duplicate_product_number_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.create_product(&token, widget()).await;
    let response = app
        .request("POST", "/api/products", Some(widget()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].as_str().unwrap().contains("W-100"));
    assert_eq!(app.repositories.products.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_category_rejected_naming_id() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut body = widget();
    body["ProductCategoryID"] = json!(999);
    let response = app
        .request("POST", "/api/products", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_existing_category_accepted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let category = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "Name": "Bikes" })),
            Some(&token),
        )
        .await;
    assert_eq!(category.status, StatusCode::CREATED);

    let mut body = widget();
    body["ProductCategoryID"] = category.body["ProductCategoryID"].clone();
    let created = app.create_product(&token, body).await;

    assert_eq!(
        created["ProductCategoryID"],
        category.body["ProductCategoryID"]
    );
}

#[tokio::test]
async fn test_client_supplied_id_collision_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut first = widget();
    first["ProductID"] = json!(680);
    let created = app.create_product(&token, first).await;
    assert_eq!(created["ProductID"], 680);

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({
                "ProductID": 680,
                "Name": "Other",
                "ProductNumber": "O-1",
                "ListPrice": 1.0
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].as_str().unwrap().contains("680"));
}

#[tokio::test]
async fn test_generated_id_after_max_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut last = widget();
    last["ProductID"] = json!(i32::MAX);
    app.create_product(&token, last).await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({
                "Name": "Other",
                "ProductNumber": "O-1",
                "ListPrice": 1.0
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let listed = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invalid_date_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut body = widget();
    body["SellStartDate"] = json!("not-a-date");
    let response = app
        .request("POST", "/api/products", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("SellStartDate")
    );
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "Name": "No number" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_null_clears_nullable_column() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut body = widget();
    body["Color"] = json!("Blue");
    body["Size"] = json!("M");
    let created = app.create_product(&token, body).await;
    let path = format!("/api/products/{}", created["ProductID"]);

    let updated = app
        .request("PUT", &path, Some(json!({ "Color": null })), Some(&token))
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.body["Color"].is_null());
    assert_eq!(updated.body["Size"], "M");
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let update = app
        .request(
            "PUT",
            "/api/products/4242",
            Some(json!({ "Name": "X" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", "/api/products/4242", None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request("GET", "/api/products/abc", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
