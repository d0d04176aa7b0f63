//! The order document shared between customer and shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::item::Item;
use super::phone::Phone;
use super::status::OrderStatus;

/// A shopping list sent from one customer to one shop, with its own
/// lifecycle status.
///
/// The order document is the only multi-writer shared resource in the
/// system: the customer creates it and may overwrite `items`; the shop
/// transitions `status` and toggles per-item availability (also an `items`
/// overwrite). The two fields are written independently - there is no
/// transaction tying a status write to an items write, and subscribers may
/// observe them in either order.
///
/// At most one open (non-terminal) order should exist per
/// (`customer_phone`, `shop_phone`) pair. That is a soft invariant enforced
/// by the find-or-update-else-create policy in the lifecycle service, not by
/// the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Repository-assigned opaque id.
    pub id: OrderId,
    /// Customer display name, denormalized for the shop dashboard.
    #[serde(rename = "customerName")]
    pub customer_name: String,
    /// Customer identity; the reverse-lookup key for the customer feed.
    #[serde(rename = "customerPhone")]
    pub customer_phone: Phone,
    /// Shop identity; the lookup key for the shop feed.
    #[serde(rename = "shopPhone")]
    pub shop_phone: Phone,
    /// The category-filtered item list, including shop annotations.
    pub items: Vec<Item>,
    /// Creation time, set by the repository.
    pub timestamp: DateTime<Utc>,
    /// Lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Whether the order is still open for edits and transitions.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
