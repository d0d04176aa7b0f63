//! Engine-level error type.
//!
//! Collaborator failures (recipe generation, geocoding) are caught at their
//! call sites and degrade a single user action, so they keep their own error
//! types. `SyncError` covers the order lifecycle boundary, where a failure
//! means a write was refused or lost.

use thiserror::Error;

use portion_perfect_core::OrderStatus;

use crate::db::RepositoryError;

/// Errors from the order lifecycle service.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The requested status change is not in the legal transition table.
    ///
    /// The backing store would happily apply it; this error is the boundary
    /// doing its job before the write is issued.
    #[error("illegal transition from {from} to {to}")]
    InvalidTransition {
        /// Current status of the order.
        from: OrderStatus,
        /// Status the caller tried to move to.
        to: OrderStatus,
    },
}
