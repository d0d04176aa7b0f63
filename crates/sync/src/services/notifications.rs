//! Notification dispatcher.
//!
//! Live feeds deliver full snapshots, not deltas, so meaningful transitions
//! have to be recovered by diffing against the previous snapshot. Two rules
//! keep this from misfiring:
//!
//! - The first snapshot after subscribing is baseline only. Pre-existing
//!   orders on page load or reconnect never notify - without this, every
//!   mount would replay the whole backlog as "new".
//! - A transition notifies exactly once: the baseline is replaced after
//!   each snapshot is processed.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use portion_perfect_core::{Order, OrderId, OrderStatus, Profile};

use crate::config::SyncConfig;

/// Severity/coloring of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing toast.
///
/// Informational only - nothing in the system waits for an acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppNotification {
    /// Unique id, used only for dismissal.
    pub id: Uuid,
    /// Short headline.
    pub title: String,
    /// One-line detail.
    pub message: String,
    /// Severity/coloring.
    pub kind: NotificationKind,
    /// When the notification was raised; drives auto-expiry.
    pub created_at: DateTime<Utc>,
}

impl AppNotification {
    fn new(title: impl Into<String>, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// The welcome toast raised after a successful sign-in.
    #[must_use]
    pub fn sign_in_welcome(profile: &Profile) -> Self {
        Self::new(
            "Welcome Back",
            format!("Successfully signed in as {}.", profile.name),
            NotificationKind::Success,
        )
    }
}

/// Holds the currently visible notifications for one party's session.
///
/// Notifications auto-expire after a fixed interval (5 seconds by default);
/// manual dismissal is idempotent - dismissing an unknown id is a no-op.
#[derive(Debug)]
pub struct NotificationCenter {
    active: Vec<AppNotification>,
    ttl: Duration,
}

impl NotificationCenter {
    /// Default time a notification stays visible.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

    /// Create a center with the default expiry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    /// Create a center with a custom expiry.
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            active: Vec::new(),
            ttl,
        }
    }

    /// Create a center with the configured expiry (`NOTIFICATION_TTL_SECS`).
    #[must_use]
    pub const fn from_config(config: &SyncConfig) -> Self {
        Self::with_ttl(config.notification_ttl)
    }

    /// Raise notifications.
    pub fn push_all(&mut self, notifications: impl IntoIterator<Item = AppNotification>) {
        self.active.extend(notifications);
    }

    /// Manually dismiss by id. Unknown ids are a no-op.
    pub fn dismiss(&mut self, id: Uuid) {
        self.active.retain(|n| n.id != id);
    }

    /// The notifications still visible at `now`, dropping expired ones.
    pub fn visible_at(&mut self, now: DateTime<Utc>) -> &[AppNotification] {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero());
        self.active.retain(|n| now - n.created_at < ttl);
        &self.active
    }

    /// The notifications visible right now.
    pub fn visible(&mut self) -> &[AppNotification] {
        self.visible_at(Utc::now())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Customer-side transition watcher.
///
/// Notifies when an order the customer already knows about moves to `ready`
/// or `rejected`. Orders appearing for the first time (including the whole
/// first snapshot) never notify.
#[derive(Debug, Default)]
pub struct CustomerStatusWatch {
    baseline: Option<HashMap<OrderId, OrderStatus>>,
}

impl CustomerStatusWatch {
    /// Create a watcher with no baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one snapshot and return the notifications it raises.
    pub fn observe(&mut self, orders: &[Order]) -> Vec<AppNotification> {
        let current: HashMap<OrderId, OrderStatus> =
            orders.iter().map(|o| (o.id, o.status)).collect();

        let notifications = match &self.baseline {
            None => Vec::new(),
            Some(previous) => orders
                .iter()
                .filter(|order| {
                    previous
                        .get(&order.id)
                        .is_some_and(|prev| *prev != order.status)
                })
                .filter_map(|order| match order.status {
                    OrderStatus::Ready => Some(AppNotification::new(
                        "Order Ready!",
                        format!("Your list at {} has been prepared.", order.shop_phone),
                        NotificationKind::Success,
                    )),
                    OrderStatus::Rejected => Some(AppNotification::new(
                        "Order Not Accepted",
                        "A vendor was unable to fulfill your request.",
                        NotificationKind::Error,
                    )),
                    OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::Completed => None,
                })
                .collect(),
        };

        self.baseline = Some(current);
        notifications
    }

    /// Forget the baseline, e.g. on unsubscribe, so a resubscription starts
    /// suppressed again.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

/// Owner-side intake watcher.
///
/// Notifies when a previously-unseen order id arrives still pending. The
/// first snapshot only seeds the seen set.
#[derive(Debug, Default)]
pub struct OwnerIntakeWatch {
    seen: Option<HashSet<OrderId>>,
}

impl OwnerIntakeWatch {
    /// Create a watcher with no baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one snapshot of the owner's visible orders.
    pub fn observe(&mut self, orders: &[Order]) -> Vec<AppNotification> {
        let notifications = match &self.seen {
            None => Vec::new(),
            Some(seen) => orders
                .iter()
                .filter(|o| !seen.contains(&o.id) && o.status == OrderStatus::Pending)
                .map(|o| {
                    AppNotification::new(
                        "New Order Received",
                        format!("{} has sent a new shopping list.", o.customer_name),
                        NotificationKind::Info,
                    )
                })
                .collect(),
        };

        self.seen = Some(orders.iter().map(|o| o.id).collect());
        notifications
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use portion_perfect_core::{Item, Phone, Role};
    use secrecy::SecretString;

    use super::*;

    fn config_with_ttl(ttl: Duration) -> SyncConfig {
        SyncConfig {
            gemini_api_key: SecretString::from("test-key"),
            gemini_model: "test-model".to_owned(),
            geocoder_base_url: String::new(),
            geocoder_user_agent: String::new(),
            notification_ttl: ttl,
            session_cache_capacity: 4,
        }
    }

    fn order(id: OrderId, status: OrderStatus) -> Order {
        Order {
            id,
            customer_name: "Asha".to_owned(),
            customer_phone: Phone::parse("9000000001").unwrap(),
            shop_phone: Phone::parse("8000000001").unwrap(),
            items: vec![Item::new("Tomato", 500.0, "g")],
            timestamp: Utc::now(),
            status,
        }
    }

    #[test]
    fn test_first_snapshot_is_suppressed_then_ready_fires_once() {
        let mut watch = CustomerStatusWatch::new();
        let ids: Vec<OrderId> = (0..3).map(|_| OrderId::generate()).collect();

        let initial: Vec<Order> = ids.iter().map(|&id| order(id, OrderStatus::Pending)).collect();
        assert!(watch.observe(&initial).is_empty());

        let mut next = initial.clone();
        next[1] = order(ids[1], OrderStatus::Ready);
        let raised = watch.observe(&next);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, "Order Ready!");
        assert_eq!(raised[0].kind, NotificationKind::Success);

        // Same snapshot again: no repeat notification.
        assert!(watch.observe(&next).is_empty());
    }

    #[test]
    fn test_rejected_notifies_accepted_does_not() {
        let mut watch = CustomerStatusWatch::new();
        let id = OrderId::generate();
        watch.observe(&[order(id, OrderStatus::Pending)]);

        assert!(watch.observe(&[order(id, OrderStatus::Accepted)]).is_empty());
        let raised = watch.observe(&[order(id, OrderStatus::Rejected)]);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, "Order Not Accepted");
        assert_eq!(raised[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_order_unseen_at_baseline_does_not_notify_customer() {
        let mut watch = CustomerStatusWatch::new();
        watch.observe(&[]);

        // An order appearing already-ready has no observed transition.
        let raised = watch.observe(&[order(OrderId::generate(), OrderStatus::Ready)]);
        assert!(raised.is_empty());
    }

    #[test]
    fn test_reset_restores_suppression() {
        let mut watch = CustomerStatusWatch::new();
        let id = OrderId::generate();
        watch.observe(&[order(id, OrderStatus::Pending)]);
        watch.reset();

        assert!(watch.observe(&[order(id, OrderStatus::Ready)]).is_empty());
    }

    #[test]
    fn test_owner_intake_suppresses_first_snapshot() {
        let mut watch = OwnerIntakeWatch::new();
        let backlog: Vec<Order> = (0..3)
            .map(|_| order(OrderId::generate(), OrderStatus::Pending))
            .collect();
        assert!(watch.observe(&backlog).is_empty());

        let mut next = backlog.clone();
        next.push(order(OrderId::generate(), OrderStatus::Pending));
        let raised = watch.observe(&next);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, "New Order Received");
    }

    #[test]
    fn test_owner_intake_ignores_non_pending_arrivals() {
        let mut watch = OwnerIntakeWatch::new();
        watch.observe(&[]);

        let raised = watch.observe(&[order(OrderId::generate(), OrderStatus::Accepted)]);
        assert!(raised.is_empty());
    }

    #[test]
    fn test_center_expiry_and_idempotent_dismissal() {
        let mut center = NotificationCenter::new();
        let note = AppNotification::new("Title", "Message", NotificationKind::Info);
        let id = note.id;
        center.push_all([note]);

        assert_eq!(center.visible().len(), 1);

        // Past the TTL everything is gone.
        let later = Utc::now() + chrono::Duration::seconds(6);
        assert!(center.visible_at(later).is_empty());

        // Dismissing the already-expired id is a no-op.
        center.dismiss(id);
        center.dismiss(Uuid::new_v4());
        assert!(center.visible().is_empty());
    }

    #[test]
    fn test_center_expiry_honors_configured_ttl() {
        // One second, not the five-second default.
        let config = config_with_ttl(Duration::from_secs(1));
        let mut center = NotificationCenter::from_config(&config);
        center.push_all([AppNotification::new("Title", "Message", NotificationKind::Info)]);

        assert_eq!(center.visible().len(), 1);

        // Gone at +2s, where the default TTL would still show it.
        let later = Utc::now() + chrono::Duration::seconds(2);
        assert!(center.visible_at(later).is_empty());
    }

    #[test]
    fn test_sign_in_welcome_toast() {
        let profile = Profile {
            role: Role::Customer,
            name: "Asha".to_owned(),
            phone: Phone::parse("9000000001").unwrap(),
            location: String::new(),
            lat: None,
            lng: None,
            shop_name: None,
            store_type: None,
        };

        let note = AppNotification::sign_in_welcome(&profile);
        assert_eq!(note.title, "Welcome Back");
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Successfully signed in as Asha.");
    }
}
