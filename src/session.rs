//! Session store - per-client cart state held across requests.
//!
//! The cart is transient by design: it lives in process memory keyed by an
//! opaque session id that travels in a cookie, and it is never written to the
//! database. A restart therefore empties every cart, which matches the
//! storefront's contract that only materialized orders are durable.

use crate::core::cart::Cart;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Number of characters in a generated session id.
const SESSION_ID_LENGTH: usize = 24;

/// An opaque per-client session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing session id, e.g. one read back from a cookie.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random session id.
    #[must_use]
    pub fn generate() -> Self {
        use rand::{Rng, distributions::Alphanumeric};

        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// The session id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-process map from session id to cart.
///
/// An unknown session id reads as an empty cart, so callers never need to
/// create sessions explicitly before using them.
#[derive(Debug, Default)]
pub struct SessionStore {
    carts: Mutex<HashMap<SessionId, Cart>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the cart for the given session.
    #[must_use]
    pub fn cart(&self, id: &SessionId) -> Cart {
        self.lock().get(id).cloned().unwrap_or_default()
    }

    /// Replaces the cart for the given session.
    pub fn put_cart(&self, id: &SessionId, cart: Cart) {
        self.lock().insert(id.clone(), cart);
    }

    /// Runs a closure against the session's cart, creating it if absent,
    /// and stores the mutated cart back.
    pub fn with_cart<T>(&self, id: &SessionId, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut carts = self.lock();
        let cart = carts.entry(id.clone()).or_default();
        f(cart)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Cart>> {
        // Recover the map from a poisoned lock; cart state has no invariant
        // that a panicked writer could have left half-applied.
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
