//! Domain models held by the [`StateStore`](crate::store::StateStore).
//!
//! Field names on the wire are `id`/`username`/`password` for users,
//! `id`/`name`/`price` for products and `user_id`/`products` for carts.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, UserId, Username};

/// A registered user.
///
/// The password is kept and returned in plain form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sequential ID assigned at registration.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// Plain-text password.
    pub password: String,
}

/// A registration request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Registration {
    pub username: Username,
    pub password: String,
}

/// A login request.
///
/// The username is not validated here; an unknown or blank username is just
/// a failed login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Caller-supplied identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// A shopping cart.
///
/// Items are snapshot copies of products, in the order they were added.
/// The same product may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// The user this cart belongs to.
    #[serde(rename = "user_id")]
    pub owner: UserId,
    /// Products in insertion order.
    #[serde(rename = "products")]
    pub items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart for `owner`.
    #[must_use]
    pub const fn empty(owner: UserId) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
