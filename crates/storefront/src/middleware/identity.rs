//! Cart owner resolution.
//!
//! There are no sessions or tokens: every cart request is attributed to the
//! owner returned by the configured [`IdentityProvider`]. The storefront ships
//! [`FixedOwner`], which always answers with one configured key.

use axum::{extract::FromRequestParts, http::request::Parts};
use minimart_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Decides which cart a request operates on.
pub trait IdentityProvider: Send + Sync {
    /// The owner key for this request, or `None` if it cannot be determined.
    fn cart_owner(&self, parts: &Parts) -> Option<UserId>;
}

/// Attributes every request to the same owner.
#[derive(Debug, Clone)]
pub struct FixedOwner(UserId);

impl FixedOwner {
    /// Create a provider that always returns `owner`.
    #[must_use]
    pub const fn new(owner: UserId) -> Self {
        Self(owner)
    }
}

impl IdentityProvider for FixedOwner {
    fn cart_owner(&self, _parts: &Parts) -> Option<UserId> {
        Some(self.0.clone())
    }
}

/// Extractor for the owner of the cart a request operates on.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CartOwner(owner): CartOwner) -> impl IntoResponse {
///     format!("cart for {owner}")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CartOwner(pub UserId);

impl FromRequestParts<AppState> for CartOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity()
            .cart_owner(parts)
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("no cart owner for this request".to_string()))
    }
}
