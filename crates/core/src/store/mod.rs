//! In-memory state store for users, products and carts.
//!
//! # Locking
//!
//! Two independent `RwLock`s:
//!
//! - the catalog lock guards users and products,
//! - the cart lock guards carts.
//!
//! User operations and cart operations never wait on each other. Readers of
//! one lock share it; a writer excludes everyone else on that lock for the
//! length of one operation.
//!
//! [`StateStore::add_to_cart`] reads the product catalog while holding the
//! cart lock, so the acquisition order is always **cart, then catalog**.
//! Nothing may take the catalog lock and then the cart lock.
//!
//! Guards are only held across in-memory map operations.

mod error;

use std::collections::HashMap;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

pub use error::StoreError;

use crate::models::{Cart, Credentials, Product, Registration, User};
use crate::types::{ProductId, UserId};

/// Users and products, guarded together by the catalog lock.
#[derive(Debug, Default)]
struct Catalog {
    /// Keyed by username.
    users: HashMap<String, User>,
    /// Keyed by product ID, in insertion order.
    products: IndexMap<ProductId, Product>,
}

/// The shared state behind every request.
///
/// Construct once at start-up and share behind an `Arc`.
#[derive(Debug, Default)]
pub struct StateStore {
    catalog: RwLock<Catalog>,
    carts: RwLock<HashMap<UserId, Cart>>,
}

impl StateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `products`.
    #[must_use]
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        for product in products {
            store.add_product(product);
        }
        store
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a new user.
    ///
    /// The new user's ID is the number of users registered before it plus one.
    /// Checking for a duplicate and inserting happen under one write guard.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateUsername`] if the username is taken. The
    /// user collection is left unchanged.
    pub fn register_user(&self, registration: Registration) -> Result<User, StoreError> {
        let Registration { username, password } = registration;

        let mut catalog = self.catalog.write();
        if catalog.users.contains_key(username.as_str()) {
            return Err(StoreError::DuplicateUsername(username.into()));
        }

        let user = User {
            id: UserId::from_sequence(catalog.users.len() + 1),
            username,
            password,
        };
        catalog
            .users
            .insert(user.username.as_str().to_owned(), user.clone());
        drop(catalog);

        debug!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Check a username and password against the registered users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] if the username is unknown or
    /// the password does not match exactly.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<User, StoreError> {
        let catalog = self.catalog.read();
        catalog
            .users
            .get(&credentials.username)
            .filter(|user| passwords_match(&user.password, &credentials.password))
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.catalog.read().users.len()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Insert a product, replacing any product with the same ID.
    ///
    /// A replaced product keeps its position in the listing.
    pub fn add_product(&self, product: Product) {
        debug!(product_id = %product.id, name = %product.name, "product added");
        self.catalog
            .write()
            .products
            .insert(product.id.clone(), product);
    }

    /// Snapshot of every product, in insertion order.
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        self.catalog.read().products.values().cloned().collect()
    }

    /// Look up a single product.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.catalog.read().products.get(id).cloned()
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// The cart for `owner`.
    ///
    /// Owners with no stored cart get a fresh empty cart. Nothing is stored.
    #[must_use]
    pub fn cart(&self, owner: &UserId) -> Cart {
        self.carts
            .read()
            .get(owner)
            .cloned()
            .unwrap_or_else(|| Cart::empty(owner.clone()))
    }

    /// Append a copy of a product to `owner`'s cart, creating the cart if
    /// needed, and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if `product_id` is not in the
    /// catalog. No cart is created or changed.
    pub fn add_to_cart(&self, owner: &UserId, product_id: &ProductId) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write();

        // Cart lock is held; the catalog read guard is released at the end of
        // this statement.
        let product = self
            .catalog
            .read()
            .products
            .get(product_id)
            .cloned()
            .ok_or_else(|| StoreError::ProductNotFound(product_id.clone()))?;

        let cart = carts
            .entry(owner.clone())
            .or_insert_with(|| Cart::empty(owner.clone()));
        cart.items.push(product);
        let updated = cart.clone();
        drop(carts);

        debug!(owner = %owner, product_id = %product_id, items = updated.len(), "added to cart");
        Ok(updated)
    }

    /// Whether a cart has been stored for `owner`.
    #[must_use]
    pub fn has_cart(&self, owner: &UserId) -> bool {
        self.carts.read().contains_key(owner)
    }

    /// Number of stored carts.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.carts.read().len()
    }
}

/// Plain, case-sensitive comparison. Hashed verification would replace this.
fn passwords_match(stored: &str, supplied: &str) -> bool {
    stored == supplied
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;
    use crate::catalog::demo_products;
    use crate::types::{Price, Username};

    fn registration(username: &str, password: &str) -> Registration {
        Registration {
            username: Username::parse(username).unwrap(),
            password: password.to_string(),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn seeded() -> StateStore {
        StateStore::with_products(demo_products().unwrap())
    }

    // =========================================================================
    // Registration & authentication
    // =========================================================================

    #[test]
    fn test_register_assigns_sequential_ids() {
        let store = StateStore::new();
        let alice = store.register_user(registration("alice", "a")).unwrap();
        let bob = store.register_user(registration("bob", "b")).unwrap();

        assert_eq!(alice.id, UserId::new("1"));
        assert_eq!(bob.id, UserId::new("2"));
        assert_eq!(store.user_count(), 2);
    }

    #[test]
    fn test_register_returns_plain_password() {
        let store = StateStore::new();
        let user = store.register_user(registration("alice", "secret")).unwrap();
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.password, "secret");
    }

    #[test]
    fn test_register_duplicate_username_leaves_store_unchanged() {
        let store = StateStore::new();
        store.register_user(registration("alice", "first")).unwrap();

        let err = store
            .register_user(registration("alice", "second"))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateUsername("alice".to_string()));
        assert_eq!(store.user_count(), 1);

        // Original password still works, the rejected one does not.
        assert!(store.authenticate(&credentials("alice", "first")).is_ok());
        assert_eq!(
            store.authenticate(&credentials("alice", "second")),
            Err(StoreError::InvalidCredentials)
        );

        // The next successful registration continues the sequence.
        let bob = store.register_user(registration("bob", "b")).unwrap();
        assert_eq!(bob.id, UserId::new("2"));
    }

    #[test]
    fn test_authenticate_success_returns_stored_user() {
        let store = StateStore::new();
        let registered = store.register_user(registration("alice", "secret")).unwrap();
        let user = store.authenticate(&credentials("alice", "secret")).unwrap();
        assert_eq!(user, registered);
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let store = StateStore::new();
        store.register_user(registration("alice", "secret")).unwrap();
        assert_eq!(
            store.authenticate(&credentials("alice", "wrong")),
            Err(StoreError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let store = StateStore::new();
        store.register_user(registration("alice", "secret")).unwrap();
        assert!(store.authenticate(&credentials("alice", "Secret")).is_err());
        assert!(store.authenticate(&credentials("Alice", "secret")).is_err());
    }

    #[test]
    fn test_authenticate_unknown_user() {
        let store = StateStore::new();
        assert_eq!(
            store.authenticate(&credentials("nobody", "")),
            Err(StoreError::InvalidCredentials)
        );
    }

    // =========================================================================
    // Products
    // =========================================================================

    #[test]
    fn test_list_products_in_insertion_order() {
        let store = seeded();
        let names: Vec<_> = store
            .list_products()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Laptop", "Smartphone", "Headphones"]);
    }

    #[test]
    fn test_add_product_overwrites_by_id() {
        let store = seeded();
        store.add_product(Product::new("2", "Phone", Price::from_cents(100).unwrap()));

        let products = store.list_products();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].name, "Phone");
        assert_eq!(
            store.product(&ProductId::new("2")).unwrap().price,
            Price::from_cents(100).unwrap()
        );
    }

    #[test]
    fn test_list_products_empty_store() {
        assert!(StateStore::new().list_products().is_empty());
    }

    // =========================================================================
    // Carts
    // =========================================================================

    #[test]
    fn test_get_cart_does_not_persist() {
        let store = seeded();
        let owner = UserId::new("1");

        let cart = store.cart(&owner);
        assert_eq!(cart.owner, owner);
        assert!(cart.is_empty());
        assert!(!store.has_cart(&owner));
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_add_to_cart_preserves_order() {
        let store = seeded();
        let owner = UserId::new("1");

        store.add_to_cart(&owner, &ProductId::new("1")).unwrap();
        let updated = store.add_to_cart(&owner, &ProductId::new("2")).unwrap();
        assert_eq!(updated.len(), 2);

        let cart = store.cart(&owner);
        let names: Vec<_> = cart.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Laptop", "Smartphone"]);
        assert!(store.has_cart(&owner));
    }

    #[test]
    fn test_add_to_cart_allows_duplicates() {
        let store = seeded();
        let owner = UserId::new("1");
        for _ in 0..3 {
            store.add_to_cart(&owner, &ProductId::new("3")).unwrap();
        }
        let cart = store.cart(&owner);
        assert_eq!(cart.len(), 3);
        assert!(cart.items.iter().all(|p| p.id == ProductId::new("3")));
    }

    #[test]
    fn test_add_unknown_product_leaves_carts_unchanged() {
        let store = seeded();
        let owner = UserId::new("1");

        let err = store
            .add_to_cart(&owner, &ProductId::new("999"))
            .unwrap_err();
        assert_eq!(err, StoreError::ProductNotFound(ProductId::new("999")));
        assert!(!store.has_cart(&owner));

        store.add_to_cart(&owner, &ProductId::new("1")).unwrap();
        assert!(store.add_to_cart(&owner, &ProductId::new("999")).is_err());
        assert_eq!(store.cart(&owner).len(), 1);
    }

    #[test]
    fn test_carts_are_per_owner() {
        let store = seeded();
        let alice = UserId::new("1");
        let bob = UserId::new("2");

        store.add_to_cart(&alice, &ProductId::new("1")).unwrap();
        store.add_to_cart(&bob, &ProductId::new("2")).unwrap();
        store.add_to_cart(&bob, &ProductId::new("3")).unwrap();

        assert_eq!(store.cart(&alice).len(), 1);
        assert_eq!(store.cart(&bob).len(), 2);
        assert_eq!(store.cart_count(), 2);
    }

    #[test]
    fn test_cart_items_are_snapshots() {
        let store = seeded();
        let owner = UserId::new("1");
        store.add_to_cart(&owner, &ProductId::new("1")).unwrap();

        store.add_product(Product::new("1", "Refurbished Laptop", Price::ZERO));

        let cart = store.cart(&owner);
        assert_eq!(cart.items[0].name, "Laptop");
        assert_eq!(cart.items[0].price, Price::from_cents(99_999).unwrap());
    }

    #[test]
    fn test_returned_cart_is_a_copy() {
        let store = seeded();
        let owner = UserId::new("1");
        let mut cart = store.add_to_cart(&owner, &ProductId::new("1")).unwrap();
        cart.items.clear();
        assert_eq!(store.cart(&owner).len(), 1);
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[test]
    fn test_concurrent_add_to_cart_loses_no_updates() {
        const WRITERS: usize = 32;

        let store = StateStore::new();
        for i in 0..WRITERS {
            store.add_product(Product::new(i.to_string(), format!("item-{i}"), Price::ZERO));
        }
        let owner = UserId::new("1");

        thread::scope(|s| {
            for i in 0..WRITERS {
                let store = &store;
                let owner = &owner;
                s.spawn(move || {
                    store
                        .add_to_cart(owner, &ProductId::new(i.to_string()))
                        .unwrap();
                });
            }
        });

        let cart = store.cart(&owner);
        assert_eq!(cart.len(), WRITERS);
        let ids: HashSet<_> = cart.items.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), WRITERS);
    }

    #[test]
    fn test_concurrent_registrations_get_distinct_ids() {
        const USERS: usize = 32;

        let store = StateStore::new();
        thread::scope(|s| {
            for i in 0..USERS {
                let store = &store;
                s.spawn(move || {
                    store
                        .register_user(registration(&format!("user-{i}"), "pw"))
                        .unwrap();
                });
            }
        });

        assert_eq!(store.user_count(), USERS);
        let ids: HashSet<_> = (0..USERS)
            .map(|i| {
                store
                    .authenticate(&credentials(&format!("user-{i}"), "pw"))
                    .unwrap()
                    .id
            })
            .collect();
        let expected: HashSet<_> = (1..=USERS).map(UserId::from_sequence).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_concurrent_duplicate_registration_single_winner() {
        const ATTEMPTS: usize = 16;

        let store = StateStore::new();
        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..ATTEMPTS)
                .map(|i| {
                    let store = &store;
                    s.spawn(move || store.register_user(registration("alice", &i.to_string())))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, StoreError::DuplicateUsername(_)))
        );
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_user_operations_do_not_wait_on_cart_lock() {
        let store = seeded();
        store.register_user(registration("alice", "secret")).unwrap();

        let _carts = store.carts.write();
        assert!(store.authenticate(&credentials("alice", "secret")).is_ok());
        assert!(store.register_user(registration("bob", "pw")).is_ok());
        assert_eq!(store.list_products().len(), 3);
    }

    #[test]
    fn test_cart_reads_do_not_wait_on_catalog_lock() {
        let store = seeded();
        let owner = UserId::new("1");

        let _catalog = store.catalog.write();
        assert!(store.cart(&owner).is_empty());
        assert!(!store.has_cart(&owner));
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let store = seeded();
        let owner = UserId::new("1");

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        store.add_to_cart(&owner, &ProductId::new("1")).unwrap();
                    }
                });
                s.spawn(|| {
                    let mut last = 0;
                    for _ in 0..50 {
                        let len = store.cart(&owner).len();
                        assert!(len >= last, "cart shrank from {last} to {len}");
                        last = len;
                    }
                });
            }
        });

        assert_eq!(store.cart(&owner).len(), 400);
    }
}
