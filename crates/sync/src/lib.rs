//! PortionPerfect Sync - The order synchronization engine.
//!
//! This crate keeps a customer's view and a shop owner's view of a shopping
//! list order consistent through a shared real-time document store. Neither
//! party talks to the other directly; all coordination is store writes
//! observed through live query subscriptions.
//!
//! # Architecture
//!
//! - [`store`] - The generic document store seam: point read, merge-write,
//!   predicate query, and subscribe-on-query, plus the in-memory
//!   implementation used by tests and local runs
//! - [`db`] - Repositories over the store: profiles keyed by phone number,
//!   orders with live feeds filtered by participant
//! - [`services`] - The lifecycle boundary: state-machine enforcement,
//!   find-or-update-else-create submission, availability toggling, the
//!   notification dispatcher, the owner dashboard feed, the instant-paint
//!   session cache, and clients for the external recipe generator and
//!   geocoder
//!
//! # Concurrency model
//!
//! Single event loop per party; every repository call is an async suspension
//! point. The store applies whole-field writes last-write-wins with no
//! cross-writer ordering and no transactions. The name-keyed availability
//! merge, invoked by the editing side before its own write, is the only
//! safeguard against clobbering the other party's annotations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod store;

pub use config::{ConfigError, SyncConfig};
pub use error::SyncError;
