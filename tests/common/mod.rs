//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use fake::{faker::lorem::en::Word, Fake};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_server::domain::CategoryDeletePolicy;
use catalog_server::presentation::http::routes::create_router;
use catalog_server::startup::AppState;

/// Response captured from a single request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

/// Test application over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with the default (restrict) delete policy
    pub fn new() -> Self {
        Self::with_policy(CategoryDeletePolicy::Restrict)
    }

    pub fn with_policy(policy: CategoryDeletePolicy) -> Self {
        Self {
            router: create_router(AppState::in_memory(policy)),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send("POST", uri, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, None).await
    }

    /// Create a category and return its id
    pub async fn create_category(&self, name: &str) -> i64 {
        let response = self
            .post_json("/api/v1/categories", json!({ "name": name }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }

    /// Create a product and return its id
    pub async fn create_product(&self, name: &str, price: f64, category_id: i64) -> i64 {
        let response = self
            .post_json(
                "/api/v1/products",
                json!({ "name": name, "price": price, "category_id": category_id }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}

/// Generate a random, non-blank catalog name
pub fn unique_name() -> String {
    let word: String = Word().fake();
    format!("{}-{}", word, (1000..9999).fake::<u32>())
}

/// Fields named in a validation error body
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
