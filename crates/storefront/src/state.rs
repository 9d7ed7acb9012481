//! Application state shared across handlers.

use std::sync::Arc;

use minimart_core::StateStore;

use crate::config::StorefrontConfig;
use crate::middleware::{FixedOwner, IdentityProvider};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the state store, configuration and the cart identity provider.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: StateStore,
    identity: Box<dyn IdentityProvider>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Cart requests are attributed to `config.demo_owner`.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: StateStore) -> Self {
        let identity = FixedOwner::new(config.demo_owner.clone());
        Self::with_identity(config, store, identity)
    }

    /// Create a new application state with a custom cart identity provider.
    #[must_use]
    pub fn with_identity(
        config: StorefrontConfig,
        store: StateStore,
        identity: impl IdentityProvider + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                identity: Box::new(identity),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the state store.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    /// Get a reference to the cart identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }
}
