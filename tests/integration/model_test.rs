//! Integration tests for product models.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_model_crud() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/models",
            Some(json!({ "Name": "Classic Vest", "Description": "Light vest" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let path = format!("/api/models/{}", created.body["ProductModelID"]);

    let cleared = app
        .request(
            "PUT",
            &path,
            Some(json!({ "Description": null })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["Description"].is_null());
    assert_eq!(cleared.body["Name"], "Classic Vest");

    let listed = app.request("GET", "/api/models", None, Some(&token)).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_model_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let model = app
        .request(
            "POST",
            "/api/models",
            Some(json!({ "Name": "Mountain-100" })),
            Some(&token),
        )
        .await;
    let model_id = model.body["ProductModelID"].clone();

    app.create_product(
        &token,
        json!({
            "Name": "Mountain-100 Silver, 38",
            "ProductNumber": "BK-M82S-38",
            "ListPrice": 3399.99,
            "ProductModelID": model_id
        }),
    )
    .await;

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/models/{model_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
}
