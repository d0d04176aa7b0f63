//! Repositories over the document store.
//!
//! # Collections
//!
//! - `customers` - customer profiles, keyed by phone number
//! - `owners` - shop owner profiles, keyed by phone number
//! - `orders` - order documents, keyed by repository-assigned id
//!
//! Repositories translate between the typed domain model and the store's
//! JSON documents. They deliberately do *not* validate lifecycle rules:
//! `set_status` and `set_items` are unconditional overwrites, exactly like
//! the backing store's own writes. Legality is enforced one layer up, in
//! [`services::orders`](crate::services::orders), at the boundary that
//! decides to issue a write.

pub mod orders;
pub mod profiles;

pub use orders::{OrderFeed, OrderRepository};
pub use profiles::ProfileRepository;

use thiserror::Error;

use crate::store::StoreError;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document did not deserialize into its domain type.
    #[error("corrupt document in {collection}: {reason}")]
    Corrupt {
        /// Collection the document came from.
        collection: String,
        /// What failed to deserialize.
        reason: String,
    },
}
