//! Generic real-time document store seam.
//!
//! The backing store is an external collaborator: a keyed-document database
//! with point read/write, merge-write, predicate query, and live
//! subscribe-to-query. This module pins down exactly the semantics the
//! engine relies on, no more:
//!
//! - Every write is eventually observed by every subscriber to a matching
//!   query.
//! - Writes to the same document are last-write-wins per field; there is no
//!   ordering guarantee across concurrent writers and no transactions.
//! - A subscription delivers the full matching snapshot immediately on
//!   registration and again after every write to the collection.
//! - Dropping a [`Subscription`] is the only cancellation primitive.
//!
//! [`MemoryStore`] is the in-process implementation used by tests; a
//! production deployment substitutes a hosted real-time database behind the
//! same trait.

mod memory;

pub use memory::MemoryStore;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;

/// A query snapshot: every matching document as `(document id, document)`.
pub type Snapshot = Vec<(String, Value)>;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field update targeted a document that does not exist.
    #[error("document not found: {collection}/{key}")]
    NotFound {
        /// Collection the lookup ran against.
        collection: String,
        /// Document key that was missing.
        key: String,
    },

    /// A document could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The generic keyed-document store contract.
///
/// All operations are async suspension points; a hung backing store blocks
/// the caller indefinitely (no timeout is imposed here). In-flight writes
/// are not cancellable and must complete or fail naturally.
pub trait DocumentStore: Send + Sync {
    /// Point read of one document.
    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Create-or-merge write: existing top-level fields not named in
    /// `fields` are kept, named ones are overwritten, and the document is
    /// created if absent.
    fn set_merged(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Overwrite the named top-level fields of an existing document.
    ///
    /// Unlike [`set_merged`](Self::set_merged), the document must already
    /// exist.
    fn update(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// One-shot predicate query: documents whose top-level `field` equals
    /// `value`.
    fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Snapshot, StoreError>> + Send;

    /// Every document in a collection.
    fn list(&self, collection: &str) -> impl Future<Output = Result<Snapshot, StoreError>> + Send;

    /// Live query: the current matching snapshot immediately, then a fresh
    /// snapshot after every write to the collection.
    fn subscribe(&self, collection: &str, field: &str, value: Value) -> Subscription;
}

/// A live query handle.
///
/// Snapshots accumulate unboundedly if not consumed; drop the subscription
/// to cancel it.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    pub(crate) const fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Wait for the next snapshot. Returns `None` once the store side has
    /// gone away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}
