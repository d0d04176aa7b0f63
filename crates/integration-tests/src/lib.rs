//! Integration tests for PortionPerfect.
//!
//! These tests drive a customer view and a shop owner view against one
//! shared in-memory store and exercise the full order lifecycle: sign-in,
//! proximity ranking, list submission, status transitions, availability
//! negotiation, and the notification contract on both sides.
//!
//! # Test Categories
//!
//! - `order_lifecycle` - The state machine, find-or-create, toggling, and
//!   terminal hiding
//! - `live_sync` - Cross-party consistency through live feeds and the
//!   notification dispatcher

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use portion_perfect_core::{Item, Phone, Profile, Role, ShoppingList, StoreType};
use portion_perfect_sync::db::{OrderRepository, ProfileRepository};
use portion_perfect_sync::services::{OrderService, ProximityService, SessionCache};
use portion_perfect_sync::store::MemoryStore;

/// Everything a test needs to play both parties against one store.
pub struct TestWorld {
    pub store: MemoryStore,
    pub profiles: ProfileRepository<MemoryStore>,
    pub orders: OrderService<MemoryStore>,
    pub proximity: ProximityService<MemoryStore>,
    pub cache: SessionCache,
}

/// Route engine tracing through the test harness, honoring `RUST_LOG`.
/// Safe to call from every test; only the first call installs.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl TestWorld {
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let store = MemoryStore::new();
        Self {
            profiles: ProfileRepository::new(store.clone()),
            orders: OrderService::new(OrderRepository::new(store.clone())),
            proximity: ProximityService::new(ProfileRepository::new(store.clone())),
            cache: SessionCache::new(),
            store,
        }
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// A customer in Bengaluru.
#[must_use]
pub fn customer() -> Profile {
    Profile {
        role: Role::Customer,
        name: "Asha".to_owned(),
        phone: Phone::parse("9000000001").unwrap(),
        location: "Indiranagar".to_owned(),
        lat: Some(12.9716),
        lng: Some(77.5946),
        shop_name: None,
        store_type: None,
    }
}

/// A shop owner a short walk from [`customer`].
#[must_use]
pub fn owner(phone: &str, shop_name: &str, store_type: StoreType) -> Profile {
    Profile {
        role: Role::Owner,
        name: "Ravi".to_owned(),
        phone: Phone::parse(phone).unwrap(),
        location: "100 Feet Road".to_owned(),
        lat: Some(12.9786),
        lng: Some(77.6001),
        shop_name: Some(shop_name.to_owned()),
        store_type: Some(store_type),
    }
}

/// A two-bucket list as the recipe generator would emit it.
#[must_use]
pub fn shopping_list() -> ShoppingList {
    ShoppingList {
        vegetable_shop: vec![
            Item::new("Tomato", 500.0, "g"),
            Item::new("Brinjal", 400.0, "g"),
        ],
        grocery_shop: vec![Item::new("Rice", 1.0, "kg"), Item::new("Hing", 100.0, "g")],
    }
}
