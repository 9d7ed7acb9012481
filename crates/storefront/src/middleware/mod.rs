//! HTTP middleware and extractors for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills the span field, echoes the header)

pub mod identity;
pub mod request_id;

pub use identity::{CartOwner, FixedOwner, IdentityProvider};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
