//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps store failures and request
//! decoding failures to HTTP responses. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use minimart_core::StoreError;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// State store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No cart owner could be resolved for the request.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every variant is a client error; breadcrumb only, no Sentry event
        tracing::info!(error = %self, "Request rejected");

        let status = match &self {
            Self::Store(err) => match err {
                StoreError::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
                StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                StoreError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let message = match &self {
            Self::Store(err) => match err {
                StoreError::DuplicateUsername(_) => "Username already exists".to_string(),
                StoreError::InvalidCredentials => "Invalid username or password".to_string(),
                StoreError::ProductNotFound(_) => "Product not found".to_string(),
            },
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized(_) | Self::NotFound(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}
