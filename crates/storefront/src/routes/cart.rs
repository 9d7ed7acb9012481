//! Cart route handlers.
//!
//! The cart is selected by the [`CartOwner`] extractor; handlers never see
//! how the owner was resolved.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use minimart_core::{Cart, ProductId};
use tracing::instrument;

use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::CartOwner;
use crate::state::AppState;

/// Show the owner's cart. Unknown owners get an empty cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, CartOwner(owner): CartOwner) -> AppJson<Cart> {
    AppJson(state.store().cart(&owner))
}

/// Add one unit of a product to the owner's cart.
///
/// Responds `201 Created` with the updated cart, or `404` if the product
/// does not exist.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    CartOwner(owner): CartOwner,
    Path(product_id): Path<ProductId>,
) -> Result<(StatusCode, AppJson<Cart>)> {
    let cart = state.store().add_to_cart(&owner, &product_id)?;
    tracing::info!(items = cart.len(), "Added to cart");
    Ok((StatusCode::CREATED, AppJson(cart)))
}
