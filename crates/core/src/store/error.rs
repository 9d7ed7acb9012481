//! State store error types.

use thiserror::Error;

use crate::types::ProductId;

/// Errors returned by [`StateStore`](super::StateStore) operations.
///
/// A failed operation never leaves a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A user with this username is already registered.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No product with this ID in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
}
