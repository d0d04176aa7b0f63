//! Order lifecycle status and the legal transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an [`Order`](crate::Order).
///
/// `Pending`, `Accepted`, and `Ready` are active; `Rejected` and `Completed`
/// are terminal. The backing store applies status writes unconditionally, so
/// the transition table here must be checked at every boundary that issues a
/// write - there is no server-side validation to fall back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Sent by the customer, not yet reviewed by the shop.
    #[default]
    Pending,
    /// Shop has accepted and is processing the list.
    Accepted,
    /// Shop declined the order. Terminal.
    Rejected,
    /// Shop has prepared the list for pickup/delivery.
    Ready,
    /// Order delivered. Terminal.
    Completed,
}

/// Which party is issuing a write against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The customer who created the order.
    Customer,
    /// The shop owner the order was sent to.
    Owner,
}

impl OrderStatus {
    /// Whether this status ends the order's lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// Whether the order is still open (non-terminal).
    #[must_use]
    pub const fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Whether `actor` may move an order from `self` to `to`.
    ///
    /// The table is deliberately narrow: no transition skips a state
    /// (pending cannot jump to ready) and none reverses (ready cannot fall
    /// back to accepted). Only the shop owner transitions status; the
    /// customer's sole write is the items array.
    #[must_use]
    pub const fn can_transition(self, to: Self, actor: Actor) -> bool {
        match actor {
            Actor::Customer => false,
            Actor::Owner => matches!(
                (self, to),
                (Self::Pending, Self::Accepted | Self::Rejected)
                    | (Self::Accepted, Self::Ready)
                    | (Self::Ready, Self::Completed)
            ),
        }
    }

    /// The single forward transition the owner is offered next, if any.
    ///
    /// `Pending` additionally allows `Rejected`; terminal states offer
    /// nothing.
    #[must_use]
    pub const fn next_for_owner(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Accepted),
            Self::Accepted => Some(Self::Ready),
            Self::Ready => Some(Self::Completed),
            Self::Rejected | Self::Completed => None,
        }
    }

    /// Whether the shop may toggle item availability at this status.
    ///
    /// Toggling is only offered while the shop is actively working the
    /// order; it is disabled for pending orders (not yet accepted) and for
    /// terminal ones.
    #[must_use]
    pub const fn allows_availability_toggle(self) -> bool {
        matches!(self, Self::Accepted | Self::Ready)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Ready => write!(f, "ready"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_partition() {
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Accepted.is_active());
        assert!(OrderStatus::Ready.is_active());
    }

    #[test]
    fn test_owner_legal_transitions() {
        use OrderStatus::{Accepted, Completed, Pending, Ready, Rejected};

        assert!(Pending.can_transition(Accepted, Actor::Owner));
        assert!(Pending.can_transition(Rejected, Actor::Owner));
        assert!(Accepted.can_transition(Ready, Actor::Owner));
        assert!(Ready.can_transition(Completed, Actor::Owner));
    }

    #[test]
    fn test_no_skips_or_reversals() {
        use OrderStatus::{Accepted, Completed, Pending, Ready, Rejected};

        // Skips
        assert!(!Pending.can_transition(Ready, Actor::Owner));
        assert!(!Pending.can_transition(Completed, Actor::Owner));
        assert!(!Accepted.can_transition(Completed, Actor::Owner));
        // Reversals
        assert!(!Ready.can_transition(Accepted, Actor::Owner));
        assert!(!Accepted.can_transition(Pending, Actor::Owner));
        // Out of terminal states
        assert!(!Rejected.can_transition(Accepted, Actor::Owner));
        assert!(!Completed.can_transition(Ready, Actor::Owner));
    }

    #[test]
    fn test_customer_transitions_nothing() {
        use OrderStatus::{Accepted, Completed, Pending, Ready, Rejected};

        for from in [Pending, Accepted, Rejected, Ready, Completed] {
            for to in [Pending, Accepted, Rejected, Ready, Completed] {
                assert!(!from.can_transition(to, Actor::Customer));
            }
        }
    }

    #[test]
    fn test_toggle_gating() {
        assert!(!OrderStatus::Pending.allows_availability_toggle());
        assert!(OrderStatus::Accepted.allows_availability_toggle());
        assert!(OrderStatus::Ready.allows_availability_toggle());
        assert!(!OrderStatus::Rejected.allows_availability_toggle());
        assert!(!OrderStatus::Completed.allows_availability_toggle());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
    }
}
