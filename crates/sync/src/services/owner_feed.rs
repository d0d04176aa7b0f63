//! Owner dashboard feed.
//!
//! The owner's view of incoming orders, layered over the raw shop feed:
//!
//! - terminal orders (rejected/completed) are excluded
//! - archived order ids are excluded for the rest of the session, even if
//!   later snapshots still carry them - the archive is a client-side set,
//!   not server state, and is deliberately ephemeral (it models "archive",
//!   not "delete")
//! - pending orders are presented before in-progress ones
//! - every visible snapshot is written through to the session cache so the
//!   next mount paints instantly

use std::collections::HashSet;

use portion_perfect_core::{Order, OrderId, OrderStatus, Phone};

use super::notifications::{AppNotification, OwnerIntakeWatch};
use super::session::SessionCache;

/// Session state for one shop owner's dashboard.
#[derive(Debug)]
pub struct OwnerFeed {
    shop_phone: Phone,
    hidden: HashSet<OrderId>,
    intake: OwnerIntakeWatch,
    cache: SessionCache,
}

impl OwnerFeed {
    /// Create a feed for a shop, backed by the session cache.
    #[must_use]
    pub fn new(shop_phone: Phone, cache: SessionCache) -> Self {
        Self {
            shop_phone,
            hidden: HashSet::new(),
            intake: OwnerIntakeWatch::new(),
            cache,
        }
    }

    /// Paint from the session cache before the first live snapshot.
    ///
    /// Cached data is display-only; it does not seed the intake watcher, so
    /// the first live snapshot still arrives suppressed.
    #[must_use]
    pub fn initial_paint(&self) -> Vec<Order> {
        self.cache
            .orders(&self.shop_phone)
            .map(|orders| self.presentable(&orders))
            .unwrap_or_default()
    }

    /// Process one live snapshot.
    ///
    /// Returns the orders to display and any "New Order Received"
    /// notifications, and refreshes the session cache.
    pub fn observe(&mut self, snapshot: &[Order]) -> (Vec<Order>, Vec<AppNotification>) {
        let visible = self.presentable(snapshot);
        let notifications = self.intake.observe(&visible);
        self.cache.store_orders(&self.shop_phone, &visible);
        (visible, notifications)
    }

    /// Archive an order the owner just rejected or completed.
    ///
    /// Hides it immediately and permanently for this session, regardless of
    /// what later snapshots say, and refreshes the cache from `current` so
    /// the next paint agrees.
    pub fn archive(&mut self, order_id: OrderId, current: &[Order]) -> Vec<Order> {
        self.hidden.insert(order_id);
        let visible = self.presentable(current);
        self.cache.store_orders(&self.shop_phone, &visible);
        visible
    }

    /// Whether an order id has been archived this session.
    #[must_use]
    pub fn is_archived(&self, order_id: OrderId) -> bool {
        self.hidden.contains(&order_id)
    }

    /// Filter to active, unarchived orders, pending first.
    fn presentable(&self, orders: &[Order]) -> Vec<Order> {
        let visible = |o: &&Order| o.is_active() && !self.hidden.contains(&o.id);

        let mut presentable: Vec<Order> = orders
            .iter()
            .filter(visible)
            .filter(|o| o.status == OrderStatus::Pending)
            .cloned()
            .collect();
        presentable.extend(
            orders
                .iter()
                .filter(visible)
                .filter(|o| o.status != OrderStatus::Pending)
                .cloned(),
        );
        presentable
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use portion_perfect_core::{Item, OrderStatus};

    use super::*;

    fn shop_phone() -> Phone {
        Phone::parse("8000000001").unwrap()
    }

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::generate(),
            customer_name: "Asha".to_owned(),
            customer_phone: Phone::parse("9000000001").unwrap(),
            shop_phone: shop_phone(),
            items: vec![Item::new("Tomato", 500.0, "g")],
            timestamp: Utc::now(),
            status,
        }
    }

    fn feed() -> OwnerFeed {
        OwnerFeed::new(shop_phone(), SessionCache::new())
    }

    #[test]
    fn test_terminal_orders_are_excluded() {
        let mut feed = feed();
        let snapshot = vec![
            order(OrderStatus::Pending),
            order(OrderStatus::Rejected),
            order(OrderStatus::Completed),
            order(OrderStatus::Accepted),
        ];

        let (visible, _) = feed.observe(&snapshot);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|o| o.is_active()));
    }

    #[test]
    fn test_pending_presented_before_in_progress() {
        let mut feed = feed();
        let snapshot = vec![
            order(OrderStatus::Ready),
            order(OrderStatus::Pending),
            order(OrderStatus::Accepted),
        ];

        let (visible, _) = feed.observe(&snapshot);
        assert_eq!(visible[0].status, OrderStatus::Pending);
    }

    #[test]
    fn test_archived_order_stays_hidden_across_snapshots() {
        let mut feed = feed();
        let active = order(OrderStatus::Ready);
        let snapshot = vec![active.clone(), order(OrderStatus::Pending)];

        let (visible, _) = feed.observe(&snapshot);
        assert_eq!(visible.len(), 2);

        // Owner marks it delivered; archive immediately, before the store
        // round-trip confirms.
        let after = feed.archive(active.id, &snapshot);
        assert!(!after.iter().any(|o| o.id == active.id));

        // A later snapshot that still carries the order (even still active,
        // e.g. the status write lost a race) must not resurrect it.
        let (visible, _) = feed.observe(&snapshot);
        assert!(!visible.iter().any(|o| o.id == active.id));
        assert!(feed.is_archived(active.id));
    }

    #[test]
    fn test_first_live_snapshot_never_notifies() {
        let mut feed = feed();
        let (_, notifications) = feed.observe(&[order(OrderStatus::Pending)]);
        assert!(notifications.is_empty());

        let mut next = vec![order(OrderStatus::Pending)];
        let (_, notifications) = feed.observe(&next);
        assert_eq!(notifications.len(), 1);

        next.push(order(OrderStatus::Pending));
        let (_, notifications) = feed.observe(&next);
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn test_cache_write_through_and_initial_paint() {
        let cache = SessionCache::new();
        let mut feed = OwnerFeed::new(shop_phone(), cache.clone());
        let snapshot = vec![order(OrderStatus::Pending), order(OrderStatus::Rejected)];
        feed.observe(&snapshot);

        // A fresh session (same cache) paints the visible subset instantly.
        let next_session = OwnerFeed::new(shop_phone(), cache);
        let painted = next_session.initial_paint();
        assert_eq!(painted.len(), 1);
        assert_eq!(painted[0].status, OrderStatus::Pending);
    }

    #[test]
    fn test_initial_paint_respects_archive() {
        let cache = SessionCache::new();
        let mut feed = OwnerFeed::new(shop_phone(), cache);
        let target = order(OrderStatus::Ready);
        let snapshot = vec![target.clone(), order(OrderStatus::Pending)];
        feed.observe(&snapshot);
        feed.archive(target.id, &snapshot);

        assert!(!feed.initial_paint().iter().any(|o| o.id == target.id));
    }
}
