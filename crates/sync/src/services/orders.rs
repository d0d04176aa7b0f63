//! Order lifecycle service.
//!
//! The boundary that turns UI intents into store writes. The backing store
//! applies any write unconditionally, so every rule lives here, in front of
//! the repository:
//!
//! - status changes are checked against the legal transition table
//! - availability toggles are gated on status and never issued otherwise
//! - list submission is find-or-update-else-create, with the name-keyed
//!   merge applied before every items write that could discard the shop's
//!   annotations

use tracing::{debug, error};

use portion_perfect_core::{
    Actor, Item, Order, OrderId, OrderStatus, Profile, ShopDistance, ShoppingList, merge,
};

use crate::db::OrderRepository;
use crate::error::SyncError;
use crate::store::DocumentStore;

/// What a list submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// No open order existed; a new pending one was appended.
    Created(OrderId),
    /// An open order existed; only its items were rewritten.
    Updated(OrderId),
    /// The list had no items relevant to this shop's category; no write.
    NothingToSend,
}

/// The order lifecycle boundary.
#[derive(Debug, Clone)]
pub struct OrderService<S> {
    orders: OrderRepository<S>,
}

impl<S: DocumentStore> OrderService<S> {
    /// Create a lifecycle service over an order repository.
    pub const fn new(orders: OrderRepository<S>) -> Self {
        Self { orders }
    }

    /// The repository underneath, for subscribing to feeds.
    pub const fn repository(&self) -> &OrderRepository<S> {
        &self.orders
    }

    /// Move an order to a new status on behalf of an actor.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::InvalidTransition` if the transition is not in
    /// the legal table for this actor - no write is issued in that case -
    /// or `SyncError::Repository` if the write itself fails.
    pub async fn transition(
        &self,
        order: &Order,
        to: OrderStatus,
        actor: Actor,
    ) -> Result<(), SyncError> {
        if !order.status.can_transition(to, actor) {
            return Err(SyncError::InvalidTransition {
                from: order.status,
                to,
            });
        }

        self.orders.set_status(order.id, to).await?;
        Ok(())
    }

    /// Cycle one item's availability and rewrite the items array.
    ///
    /// A no-op (no write, returns `None`) while the order's status does not
    /// allow toggling - pending, rejected, or completed - and for an index
    /// past the end of the list. Otherwise returns the items as written.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the items write fails.
    pub async fn toggle_item(
        &self,
        order: &Order,
        index: usize,
    ) -> Result<Option<Vec<Item>>, SyncError> {
        if !order.status.allows_availability_toggle() {
            debug!(order_id = %order.id, status = %order.status, "availability toggle ignored");
            return Ok(None);
        }

        let mut items = order.items.clone();
        let Some(item) = items.get_mut(index) else {
            debug!(order_id = %order.id, index, "availability toggle index out of range");
            return Ok(None);
        };
        item.available = Some(merge::next_availability(item.available));

        self.orders.set_items(order.id, &items).await?;
        Ok(Some(items))
    }

    /// Submit the customer's list to one shop: find-or-update-else-create.
    ///
    /// The list is first filtered to the shop's category. If an open order
    /// to this shop already exists among `known_orders`, only its items are
    /// rewritten - merged by name so the shop's annotations survive - and
    /// its status is left untouched. Only when no open order exists is a
    /// new pending one appended.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Repository` if the create or items write fails.
    pub async fn send_or_update(
        &self,
        customer: &Profile,
        shop: &ShopDistance,
        list: &ShoppingList,
        known_orders: &[Order],
    ) -> Result<SendOutcome, SyncError> {
        let relevant = list.items_for(shop.store_type);
        if relevant.is_empty() {
            return Ok(SendOutcome::NothingToSend);
        }

        let open_order = known_orders
            .iter()
            .find(|o| o.shop_phone == shop.phone && o.is_active());

        match open_order {
            Some(order) => {
                let merged = merge::carry_availability(&relevant, &order.items);
                self.orders.set_items(order.id, &merged).await?;
                Ok(SendOutcome::Updated(order.id))
            }
            None => {
                let id = self.orders.create(&shop.phone, customer, relevant).await?;
                Ok(SendOutcome::Created(id))
            }
        }
    }

    /// Push an edited list to every open order whose shop is known.
    ///
    /// Invoked after the customer edits their shopping list while orders are
    /// in flight. Shops missing from `shops` and orders whose relevant
    /// category subset is empty are skipped. A failed write is logged and
    /// does not stop the remaining orders from syncing; the local list stays
    /// as edited either way (the known inconsistency the design accepts).
    ///
    /// Returns the number of orders whose items were rewritten.
    pub async fn resync_active_orders(
        &self,
        list: &ShoppingList,
        known_orders: &[Order],
        shops: &[ShopDistance],
    ) -> usize {
        let mut synced = 0;

        for order in known_orders.iter().filter(|o| o.is_active()) {
            let Some(shop) = shops.iter().find(|s| s.phone == order.shop_phone) else {
                continue;
            };

            let relevant = list.items_for(shop.store_type);
            if relevant.is_empty() {
                continue;
            }

            let merged = merge::carry_availability(&relevant, &order.items);
            match self.orders.set_items(order.id, &merged).await {
                Ok(()) => synced += 1,
                Err(e) => {
                    error!(order_id = %order.id, error = %e, "failed to resync items for order");
                }
            }
        }

        synced
    }
}
