//! Integration tests for product categories.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_category_hierarchy() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let parent = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "Name": "Bikes" })),
            Some(&token),
        )
        .await;
    assert_eq!(parent.status, StatusCode::CREATED);
    let parent_id = parent.body["ProductCategoryID"].clone();
    assert!(parent.body["ParentProductCategoryID"].is_null());

    let child = app
        .request(
            "POST",
            "/api/categories/",
            Some(json!({ "Name": "Road Bikes", "ParentProductCategoryID": parent_id })),
            Some(&token),
        )
        .await;
    assert_eq!(child.status, StatusCode::CREATED);
    assert_eq!(child.body["ParentProductCategoryID"], parent_id);

    // A parent may not move under its own child.
    let cycle = app
        .request(
            "PUT",
            &format!("/api/categories/{parent_id}"),
            Some(json!({ "ParentProductCategoryID": child.body["ProductCategoryID"] })),
            Some(&token),
        )
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/categories/{parent_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(blocked.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let category = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "Name": "Helmets" })),
            Some(&token),
        )
        .await;
    let category_id = category.body["ProductCategoryID"].clone();

    let product = app
        .create_product(
            &token,
            json!({
                "Name": "Sport-100 Helmet",
                "ProductNumber": "HL-U509",
                "ListPrice": 34.99,
                "ProductCategoryID": category_id
            }),
        )
        .await;

    let path = format!("/api/categories/{category_id}");
    let blocked = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let product_path = format!("/api/products/{}", product["ProductID"]);
    let removed = app
        .request("DELETE", &product_path, None, Some(&token))
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_parent_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "Name": "Orphan", "ParentProductCategoryID": 77 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].as_str().unwrap().contains("77"));
}
