//! Product API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{error_fields, unique_name, TestApp};

#[tokio::test]
async fn test_catalog_scenario() {
    let app = TestApp::new();

    let category_id = app.create_category("Electronics").await;
    assert_eq!(category_id, 1);

    let phone = app
        .post_json(
            "/api/v1/products",
            json!({ "name": "Phone", "price": 10.00, "category_id": 1 }),
        )
        .await;
    assert_eq!(phone.status, StatusCode::CREATED);
    assert_eq!(phone.location.as_deref(), Some("/api/v1/products/1"));
    assert_eq!(phone.body["id"], 1);

    let bad = app
        .post_json(
            "/api/v1/products",
            json!({ "name": "Bad", "price": 0, "category_id": 1 }),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&bad.body), vec!["price"]);

    let orphan = app
        .post_json(
            "/api/v1/products",
            json!({ "name": "Orphan", "price": 5, "category_id": 999 }),
        )
        .await;
    assert_eq!(orphan.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&orphan.body), vec!["category_id"]);
    assert_eq!(
        orphan.body["errors"][0]["message"],
        "Category with ID 999 does not exist."
    );

    // Only the valid product was stored
    let products = app.get("/api/v1/products").await;
    assert_eq!(products.body.as_array().unwrap().len(), 1);

    // Restricted delete leaves both rows intact
    let delete = app.delete("/api/v1/categories/1").await;
    assert_eq!(delete.status, StatusCode::CONFLICT);
    assert_eq!(app.get("/api/v1/products/1").await.body["category_id"], 1);
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/products",
            json!({ "name": "  ", "price": -3.5, "category_id": 999 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10007);
    assert_eq!(
        error_fields(&response.body),
        vec!["name", "price", "category_id"]
    );
}

#[tokio::test]
async fn test_get_product() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;
    let product_id = app.create_product("Laptop", 1500.0, category_id).await;

    let response = app.get(&format!("/api/v1/products/{}", product_id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": product_id,
            "name": "Laptop",
            "description": null,
            "price": 1500.0,
            "category_id": category_id,
        })
    );
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;

    assert_eq!(app.get("/api/v1/products/5").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/api/v1/products/5").await.status, StatusCode::NOT_FOUND);

    let response = app
        .put_json(
            "/api/v1/products/5",
            json!({ "name": "Ghost", "price": 1, "category_id": category_id }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_product_id_rejected() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;
    let body = json!({ "id": 3, "name": "Lamp", "price": 20, "category_id": category_id });

    assert_eq!(
        app.post_json("/api/v1/products", body.clone()).await.status,
        StatusCode::CREATED
    );

    let duplicate = app.post_json("/api/v1/products", body).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["message"], "A product with ID 3 already exists.");
}

#[tokio::test]
async fn test_update_moves_product_between_categories() {
    let app = TestApp::new();
    let from = app.create_category(&unique_name()).await;
    let to = app.create_category(&unique_name()).await;
    let product_id = app.create_product("Desk", 99.0, from).await;

    let response = app
        .put_json(
            &format!("/api/v1/products/{}", product_id),
            json!({ "name": "Standing desk", "price": 149.5, "category_id": to }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let target = app.get(&format!("/api/v1/categories/{}", to)).await;
    assert_eq!(target.body["products"][0]["name"], "Standing desk");
    let source = app.get(&format!("/api/v1/categories/{}", from)).await;
    assert_eq!(source.body["products"], json!([]));
}

#[tokio::test]
async fn test_update_to_missing_category_leaves_product_unchanged() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;
    let product_id = app.create_product("Chair", 45.0, category_id).await;

    let response = app
        .put_json(
            &format!("/api/v1/products/{}", product_id),
            json!({ "name": "Chair", "price": 45, "category_id": 404 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.body), vec!["category_id"]);

    let stored = app.get(&format!("/api/v1/products/{}", product_id)).await;
    assert_eq!(stored.body["category_id"], category_id);
}

#[tokio::test]
async fn test_update_with_mismatched_id_is_rejected() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;
    let product_id = app.create_product("Pen", 1.5, category_id).await;

    let response = app
        .put_json(
            &format!("/api/v1/products/{}", product_id),
            json!({ "id": product_id + 10, "name": "Pen", "price": 2, "category_id": category_id }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10002);
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;
    let product_id = app.create_product("Mug", 7.25, category_id).await;
    let uri = format!("/api/v1/products/{}", product_id);

    assert_eq!(app.delete(&uri).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);

    // The category is free to go once its last product is gone
    let category = app
        .delete(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(category.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_sub_cent_price_is_a_validation_error() {
    let app = TestApp::new();
    let category_id = app.create_category(&unique_name()).await;

    let response = app
        .post_json(
            "/api/v1/products",
            json!({ "name": "Gum", "price": 0.001, "category_id": category_id }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10007);
    assert_eq!(error_fields(&response.body), vec!["price"]);
    assert_eq!(app.get("/api/v1/products").await.body, json!([]));
}
