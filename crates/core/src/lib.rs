//! PortionPerfect Core - Shared types and pure order logic.
//!
//! This crate provides the common types used across all PortionPerfect
//! components:
//! - `sync` - The order synchronization engine (repositories, live feeds,
//!   notifications, external collaborator clients)
//! - `integration-tests` - End-to-end lifecycle tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no async,
//! no HTTP clients. Everything here is deterministic and unit-testable in
//! isolation:
//!
//! - [`types`] - Newtype wrappers for phone numbers and order ids, the order
//!   status state machine, profiles, shopping lists, and geographic
//!   coordinates with the haversine distance calculator
//! - [`merge`] - The item availability merge engine that reconciles
//!   customer-edited shopping lists with shop-side availability annotations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod merge;
pub mod types;

pub use types::*;
