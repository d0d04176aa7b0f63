//! Instant-paint session cache.
//!
//! A client-side cache of the last-used profiles and each shop's visible
//! order list, used to paint the UI before the live subscription's first
//! snapshot arrives. It is read-through only: the first live snapshot
//! replaces whatever was painted from here, and nothing ever treats cached
//! data as authoritative beyond that first paint.

use moka::sync::Cache;

use portion_perfect_core::{Order, Phone, Profile, Role};

use crate::config::SyncConfig;

/// Session-local cache shared by both party views.
///
/// Clones share the same underlying cache.
#[derive(Debug, Clone)]
pub struct SessionCache {
    profiles: Cache<Role, Profile>,
    orders: Cache<String, Vec<Order>>,
}

impl SessionCache {
    /// Default bound on cached per-shop order lists.
    pub const DEFAULT_CAPACITY: u64 = 64;

    /// Create a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` per-shop order lists.
    #[must_use]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            // One slot per role is all that's ever stored.
            profiles: Cache::new(2),
            orders: Cache::new(capacity),
        }
    }

    /// Create a cache with the configured bound (`SESSION_CACHE_CAPACITY`).
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::with_capacity(config.session_cache_capacity)
    }

    /// Remember the last-used profile for its role.
    pub fn store_profile(&self, profile: &Profile) {
        self.profiles.insert(profile.role, profile.clone());
    }

    /// The last-used profile for a role, if one signed in this session.
    #[must_use]
    pub fn profile(&self, role: Role) -> Option<Profile> {
        self.profiles.get(&role)
    }

    /// Forget the profile for a role (sign-out).
    pub fn clear_profile(&self, role: Role) {
        self.profiles.invalidate(&role);
    }

    /// Remember a shop's visible order list for instant paint.
    pub fn store_orders(&self, shop_phone: &Phone, orders: &[Order]) {
        self.orders.insert(shop_phone.as_str().to_owned(), orders.to_vec());
    }

    /// The cached order list for a shop, if any.
    #[must_use]
    pub fn orders(&self, shop_phone: &Phone) -> Option<Vec<Order>> {
        self.orders.get(shop_phone.as_str())
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
