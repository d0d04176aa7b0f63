//! Order repository: creation, live feeds, and unconditional field writes.

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::warn;

use portion_perfect_core::{Item, Order, OrderId, OrderStatus, Phone, Profile};

use super::RepositoryError;
use crate::store::{DocumentStore, Snapshot, StoreError, Subscription};

const ORDERS: &str = "orders";

/// Repository for order documents.
///
/// This layer is intentionally dumb: `create` always appends (the
/// find-or-update-else-create policy lives in the lifecycle service), and
/// the two field writes are unconditional overwrites with no transition
/// validation. Status and items are independent writes; subscribers may
/// observe them separately and in either order relative to a concurrent
/// writer.
#[derive(Debug, Clone)]
pub struct OrderRepository<S> {
    store: S,
}

impl<S: DocumentStore> OrderRepository<S> {
    /// Create a new order repository over a store handle.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a new pending order and return its id.
    ///
    /// Does not check for an existing open order to the same shop; that is
    /// the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if serialization or the write fails.
    pub async fn create(
        &self,
        shop_phone: &Phone,
        customer: &Profile,
        items: Vec<Item>,
    ) -> Result<OrderId, RepositoryError> {
        let order = Order {
            id: OrderId::generate(),
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            shop_phone: shop_phone.clone(),
            items,
            timestamp: Utc::now(),
            status: OrderStatus::Pending,
        };

        let fields = match serde_json::to_value(&order).map_err(StoreError::from)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        self.store
            .set_merged(ORDERS, &order.id.to_string(), fields)
            .await?;
        Ok(order.id)
    }

    /// Live feed of orders addressed to a shop.
    ///
    /// Unfiltered by status; the owner dashboard decides what to hide.
    pub fn subscribe_by_shop(&self, shop_phone: &Phone) -> OrderFeed {
        OrderFeed::new(
            self.store
                .subscribe(ORDERS, "shopPhone", json!(shop_phone.as_str())),
        )
    }

    /// Live feed of orders sent by a customer, across all shops.
    pub fn subscribe_by_customer(&self, customer_phone: &Phone) -> OrderFeed {
        OrderFeed::new(
            self.store
                .subscribe(ORDERS, "customerPhone", json!(customer_phone.as_str())),
        )
    }

    /// Unconditional status overwrite.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the order does not exist or the
    /// write fails.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut fields = Map::new();
        fields.insert("status".to_owned(), serde_json::to_value(status).map_err(StoreError::from)?);
        self.store
            .update(ORDERS, &order_id.to_string(), fields)
            .await?;
        Ok(())
    }

    /// Unconditional overwrite of the full items array.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the order does not exist or the
    /// write fails.
    pub async fn set_items(
        &self,
        order_id: OrderId,
        items: &[Item],
    ) -> Result<(), RepositoryError> {
        let mut fields = Map::new();
        fields.insert("items".to_owned(), serde_json::to_value(items).map_err(StoreError::from)?);
        self.store
            .update(ORDERS, &order_id.to_string(), fields)
            .await?;
        Ok(())
    }
}

/// A live, typed order feed.
///
/// Each snapshot is the full matching order set, newest first. Documents
/// that fail to deserialize are logged and skipped so one corrupt order
/// cannot wedge the feed. Drop the feed to unsubscribe.
#[derive(Debug)]
pub struct OrderFeed {
    sub: Subscription,
}

impl OrderFeed {
    const fn new(sub: Subscription) -> Self {
        Self { sub }
    }

    /// Wait for the next snapshot.
    pub async fn next(&mut self) -> Option<Vec<Order>> {
        let snapshot = self.sub.next().await?;
        Some(decode(snapshot))
    }
}

fn decode(snapshot: Snapshot) -> Vec<Order> {
    let mut orders: Vec<Order> = snapshot
        .into_iter()
        .filter_map(|(key, doc)| match serde_json::from_value(doc) {
            Ok(order) => Some(order),
            Err(e) => {
                warn!(key, error = %e, "skipping corrupt order document");
                None
            }
        })
        .collect();

    // Newest first, matching how both dashboards present orders.
    orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    orders
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use portion_perfect_core::Role;

    use super::*;
    use crate::store::MemoryStore;

    fn customer() -> Profile {
        Profile {
            role: Role::Customer,
            name: "Asha".to_owned(),
            phone: Phone::parse("9000000001").unwrap(),
            location: String::new(),
            lat: None,
            lng: None,
            shop_name: None,
            store_type: None,
        }
    }

    fn items() -> Vec<Item> {
        vec![Item::new("Tomato", 500.0, "g"), Item::new("Rice", 1.0, "kg")]
    }

    #[tokio::test]
    async fn test_create_appends_pending_order() {
        let repo = OrderRepository::new(MemoryStore::new());
        let shop = Phone::parse("8000000001").unwrap();

        let id = repo.create(&shop, &customer(), items()).await.unwrap();

        let mut feed = repo.subscribe_by_shop(&shop);
        let orders = feed.next().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, id);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert!(orders[0].items.iter().all(|i| i.available.is_none()));
    }

    #[tokio::test]
    async fn test_create_always_appends_no_dedup() {
        let repo = OrderRepository::new(MemoryStore::new());
        let shop = Phone::parse("8000000001").unwrap();

        repo.create(&shop, &customer(), items()).await.unwrap();
        repo.create(&shop, &customer(), items()).await.unwrap();

        let mut feed = repo.subscribe_by_shop(&shop);
        assert_eq!(feed.next().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_feeds_filter_by_participant() {
        let repo = OrderRepository::new(MemoryStore::new());
        let shop_a = Phone::parse("8000000001").unwrap();
        let shop_b = Phone::parse("8000000002").unwrap();

        repo.create(&shop_a, &customer(), items()).await.unwrap();
        repo.create(&shop_b, &customer(), items()).await.unwrap();

        let mut by_shop = repo.subscribe_by_shop(&shop_a);
        assert_eq!(by_shop.next().await.unwrap().len(), 1);

        let mut by_customer = repo.subscribe_by_customer(&customer().phone);
        assert_eq!(by_customer.next().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_status_and_items_are_independent_writes() {
        let repo = OrderRepository::new(MemoryStore::new());
        let shop = Phone::parse("8000000001").unwrap();
        let id = repo.create(&shop, &customer(), items()).await.unwrap();

        let mut feed = repo.subscribe_by_shop(&shop);
        let _ = feed.next().await.unwrap();

        repo.set_status(id, OrderStatus::Accepted).await.unwrap();
        let after_status = feed.next().await.unwrap();
        assert_eq!(after_status[0].status, OrderStatus::Accepted);
        assert_eq!(after_status[0].items.len(), 2);

        let mut toggled = after_status[0].items.clone();
        toggled[0].available = Some(true);
        repo.set_items(id, &toggled).await.unwrap();
        let after_items = feed.next().await.unwrap();
        assert_eq!(after_items[0].items[0].available, Some(true));
        assert_eq!(after_items[0].status, OrderStatus::Accepted);
    }

    #[tokio::test]
    async fn test_feed_skips_corrupt_documents() {
        let store = MemoryStore::new();
        let repo = OrderRepository::new(store.clone());
        let shop = Phone::parse("8000000001").unwrap();
        repo.create(&shop, &customer(), items()).await.unwrap();

        // A document missing required fields must not wedge the feed.
        let mut junk = Map::new();
        junk.insert("shopPhone".to_owned(), json!("8000000001"));
        store.set_merged("orders", "junk", junk).await.unwrap();

        let mut feed = repo.subscribe_by_shop(&shop);
        let orders = feed.next().await.unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn test_feed_sorts_newest_first() {
        let repo = OrderRepository::new(MemoryStore::new());
        let shop = Phone::parse("8000000001").unwrap();

        let first = repo.create(&shop, &customer(), items()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create(&shop, &customer(), items()).await.unwrap();

        let mut feed = repo.subscribe_by_shop(&shop);
        let orders = feed.next().await.unwrap();
        assert_eq!(orders[0].id, second);
        assert_eq!(orders[1].id, first);
    }
}
