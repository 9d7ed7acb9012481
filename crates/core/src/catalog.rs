//! The demo catalog seeded at start-up.

use crate::models::Product;
use crate::types::{Price, PriceError};

/// Products seeded into a fresh store, in listing order.
///
/// # Errors
///
/// Returns [`PriceError`] only if one of the built-in prices is invalid.
pub fn demo_products() -> Result<Vec<Product>, PriceError> {
    Ok(vec![
        Product::new("1", "Laptop", Price::from_cents(99_999)?),
        Product::new("2", "Smartphone", Price::from_cents(59_999)?),
        Product::new("3", "Headphones", Price::from_cents(7_999)?),
    ])
}
