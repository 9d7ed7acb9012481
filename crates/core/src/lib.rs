//! Minimart Core - domain types and the shared state store.
//!
//! This crate is used by:
//! - `storefront` - HTTP API for registration, login, products and carts
//! - `integration-tests` - end-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate holds all state and the rules that guard it, but does no
//! I/O and knows nothing about HTTP. The storefront translates requests into
//! [`StateStore`] calls and [`StoreError`]s into responses.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and usernames
//! - [`models`] - Users, products, carts and request payloads
//! - [`store`] - The lock-guarded in-memory store
//! - [`catalog`] - Products seeded at start-up

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod models;
pub mod store;
pub mod types;

pub use models::{Cart, Credentials, Product, Registration, User};
pub use store::{StateStore, StoreError};
pub use types::*;
