//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Auth
//! POST /register               - Register a user (201, 400)
//! POST /login                  - Log in (200, 400, 401)
//!
//! # Products
//! GET  /products               - Product listing
//!
//! # Cart
//! GET  /cart                   - Current owner's cart
//! POST /cart/add/{product_id}  - Add a product (201, 404)
//! ```

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{product_id}", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Auth routes
        .merge(auth_routes())
        // Product routes
        .route("/products", get(products::index))
        // Cart routes
        .nest("/cart", cart_routes())
        .fallback(not_found)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
