//! Integration tests for Minimart.
//!
//! Tests drive the storefront router in-process with `tower::ServiceExt::oneshot`,
//! so no server or port is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minimart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_auth` - Registration and login
//! - `storefront_catalog` - Product listing and health
//! - `storefront_cart` - Cart reads, adds and owner resolution
//! - `storefront_scenarios` - End-to-end flows and concurrent clients

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header, request::Parts},
};
use http_body_util::BodyExt;
use minimart_core::catalog::demo_products;
use minimart_core::{StateStore, UserId};
use minimart_storefront::config::StorefrontConfig;
use minimart_storefront::middleware::IdentityProvider;
use minimart_storefront::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// Header read by [`HeaderOwner`].
pub const OWNER_HEADER: &str = "x-cart-owner";

/// Identity provider that takes the cart owner from the `x-cart-owner` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderOwner;

impl IdentityProvider for HeaderOwner {
    fn cart_owner(&self, parts: &Parts) -> Option<UserId> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|owner| !owner.is_empty())
            .map(UserId::from)
    }
}

/// A storefront router plus a handle on its state for inspecting the store.
#[derive(Clone)]
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

impl TestContext {
    /// Storefront with the demo catalog and the default fixed cart owner.
    pub fn new() -> Self {
        Self::from_state(AppState::new(StorefrontConfig::default(), seeded_store()))
    }

    /// Storefront with the demo catalog and a custom identity provider.
    pub fn with_identity(identity: impl IdentityProvider + 'static) -> Self {
        Self::from_state(AppState::with_identity(
            StorefrontConfig::default(),
            seeded_store(),
            identity,
        ))
    }

    /// Storefront over an existing store with the default fixed cart owner.
    pub fn with_store(store: StateStore) -> Self {
        Self::from_state(AppState::new(StorefrontConfig::default(), store))
    }

    fn from_state(state: AppState) -> Self {
        let router = minimart_storefront::app(state.clone());
        Self { state, router }
    }

    /// The state store behind the router.
    pub fn store(&self) -> &StateStore {
        self.state.store()
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri).body(Body::empty()).expect("valid request"))
            .await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(request(Method::POST, uri).body(Body::empty()).expect("valid request"))
            .await
    }

    pub async fn post_json(&self, uri: &str, json: &Value) -> TestResponse {
        self.post_raw(uri, "application/json", &json.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(
            request(Method::POST, uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_owned()))
                .expect("valid request"),
        )
        .await
    }

    /// `GET` with the [`OWNER_HEADER`] set.
    pub async fn get_as(&self, owner: &str, uri: &str) -> TestResponse {
        self.send(
            request(Method::GET, uri)
                .header(OWNER_HEADER, owner)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// `POST` with the [`OWNER_HEADER`] set.
    pub async fn post_as(&self, owner: &str, uri: &str) -> TestResponse {
        self.send(
            request(Method::POST, uri)
                .header(OWNER_HEADER, owner)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// Register a user and return the response.
    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/register",
            &serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Log in and return the response.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/login",
            &serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Product names of a cart or product-list JSON array, in order.
pub fn names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|p| p["name"].as_str().expect("product name").to_owned())
        .collect()
}

fn seeded_store() -> StateStore {
    StateStore::with_products(demo_products().expect("demo catalog is valid"))
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}
