//! Newtype ID for type-safe order references.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for an [`Order`](crate::Order).
///
/// Order ids are assigned by the order repository when a document is first
/// appended to the backing store; callers never construct them from raw
/// customer input. The wrapper prevents accidentally mixing order ids with
/// other string-shaped identifiers such as phone numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new random order id.
    ///
    /// Only the repository should call this when appending a new document.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one read back from the store).
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<OrderId> for Uuid {
    fn from(id: OrderId) -> Self {
        id.0
    }
}
