//! Category API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use catalog_server::domain::CategoryDeletePolicy;

use crate::common::{error_fields, unique_name, TestApp};

#[tokio::test]
async fn test_create_category_returns_location() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/categories",
            json!({ "name": "Electronics", "description": "Gadgets" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.location.as_deref(), Some("/api/v1/categories/1"));
    assert_eq!(
        response.body,
        json!({ "id": 1, "name": "Electronics", "description": "Gadgets", "products": [] })
    );
}

#[tokio::test]
async fn test_get_category_includes_products() {
    let app = TestApp::new();
    let category_id = app.create_category("Books").await;
    app.create_product("Novel", 15.99, category_id).await;

    let response = app
        .get(&format!("/api/v1/categories/{}", category_id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["products"][0]["name"], "Novel");
    assert_eq!(response.body["products"][0]["price"], json!(15.99));
}

#[tokio::test]
async fn test_list_categories() {
    let app = TestApp::new();
    let first = unique_name();
    let second = unique_name();
    app.create_category(&first).await;
    app.create_category(&second).await;

    let response = app.get("/api/v1/categories").await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec![first, second]);
}

#[tokio::test]
async fn test_missing_category_is_not_found() {
    let app = TestApp::new();

    assert_eq!(app.get("/api/v1/categories/42").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/api/v1/categories/42").await.status, StatusCode::NOT_FOUND);

    let response = app
        .put_json("/api/v1/categories/42", json!({ "name": "Nothing" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["code"], 10001);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.get("/api/v1/categories/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid category ID");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/v1/categories", json!({ "name": "   " }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10007);
    assert_eq!(error_fields(&response.body), vec!["name"]);

    let listed = app.get("/api/v1/categories").await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_explicit_id_is_kept_and_duplicates_rejected() {
    let app = TestApp::new();

    let created = app
        .post_json("/api/v1/categories", json!({ "id": 7, "name": "Garden" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 7);

    let duplicate = app
        .post_json("/api/v1/categories", json!({ "id": 7, "name": "Garden again" }))
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["message"], "A category with ID 7 already exists.");

    let stored = app.get("/api/v1/categories/7").await;
    assert_eq!(stored.body["name"], "Garden");
}

#[tokio::test]
async fn test_update_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Clothing").await;

    let response = app
        .put_json(
            &format!("/api/v1/categories/{}", category_id),
            json!({ "id": category_id, "name": "Apparel", "description": "Renamed" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let stored = app
        .get(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(stored.body["name"], "Apparel");
    assert_eq!(stored.body["description"], "Renamed");
}

#[tokio::test]
async fn test_update_with_mismatched_id_is_rejected() {
    let app = TestApp::new();
    let category_id = app.create_category("Clothing").await;

    let response = app
        .put_json(
            &format!("/api/v1/categories/{}", category_id),
            json!({ "id": category_id + 1, "name": "Apparel" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let stored = app
        .get(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(stored.body["name"], "Clothing");
}

#[tokio::test]
async fn test_delete_empty_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Temporary").await;
    let uri = format!("/api/v1/categories/{}", category_id);

    assert_eq!(app.delete(&uri).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restrict_policy_refuses_referenced_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", 10.0, category_id).await;

    let response = app
        .delete(&format!("/api/v1/categories/{}", category_id))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], 10005);

    // Nothing was removed
    let category = app
        .get(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(category.status, StatusCode::OK);
    let product = app.get(&format!("/api/v1/products/{}", product_id)).await;
    assert_eq!(product.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cascade_policy_removes_products() {
    let app = TestApp::with_policy(CategoryDeletePolicy::Cascade);
    let doomed = app.create_category("Electronics").await;
    let kept = app.create_category("Books").await;
    let phone = app.create_product("Phone", 10.0, doomed).await;
    let novel = app.create_product("Novel", 12.5, kept).await;

    let response = app.delete(&format!("/api/v1/categories/{}", doomed)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert_eq!(
        app.get(&format!("/api/v1/products/{}", phone)).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get(&format!("/api/v1/products/{}", novel)).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_largest_explicit_id_does_not_break_the_store() {
    let app = TestApp::new();

    let created = app
        .post_json(
            "/api/v1/categories",
            json!({ "id": i32::MAX, "name": "Last" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], i32::MAX);

    let negative = app
        .post_json("/api/v1/categories", json!({ "id": -1, "name": "Negative" }))
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&negative.body), vec!["id"]);

    let listed = app.get("/api/v1/categories").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}
