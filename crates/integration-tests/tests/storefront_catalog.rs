//! Integration tests for product listing, health and routing fallbacks.

use axum::http::StatusCode;
use minimart_core::StateStore;
use minimart_integration_tests::{TestContext, names};
use minimart_storefront::middleware::REQUEST_ID_HEADER;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let response = ctx.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_products_lists_demo_catalog_in_seed_order() {
    let ctx = TestContext::new();

    let response = ctx.get("/products").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        names(&response.json()),
        ["Laptop", "Smartphone", "Headphones"]
    );
}

#[tokio::test]
async fn test_products_wire_format() {
    let ctx = TestContext::new();

    let products = ctx.get("/products").await.json();
    let laptop = &products[0];

    assert_eq!(laptop["id"], "1");
    assert_eq!(laptop["name"], "Laptop");
    let price = laptop["price"].as_f64().expect("price is a JSON number");
    assert!((price - 999.99).abs() < 1e-9);
}

#[tokio::test]
async fn test_products_empty_catalog() {
    let ctx = TestContext::with_store(StateStore::new());

    let response = ctx.get("/products").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    let response = ctx.get("/orders").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let ctx = TestContext::new();

    let response = ctx.get("/health").await;

    let request_id = response
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let ctx = TestContext::new();

    let response = ctx
        .send(
            axum::http::Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "upstream-123")
                .body(axum::body::Body::empty())
                .expect("valid request"),
        )
        .await;

    assert_eq!(
        response
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("upstream-123")
    );
}
