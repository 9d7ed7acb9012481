//! Product route handlers.

use axum::extract::State;
use minimart_core::Product;
use tracing::instrument;

use crate::extract::AppJson;
use crate::state::AppState;

/// List every product in the catalog.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> AppJson<Vec<Product>> {
    AppJson(state.store().list_products())
}
