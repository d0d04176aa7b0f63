//! Core types for PortionPerfect.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod geo;
pub mod id;
pub mod item;
pub mod order;
pub mod phone;
pub mod profile;
pub mod recipe;
pub mod status;

pub use geo::{Coordinates, EARTH_RADIUS_KM, haversine_km, rank_shops};
pub use id::OrderId;
pub use item::{Item, ShoppingList, StoreType};
pub use order::Order;
pub use phone::{Phone, PhoneError};
pub use profile::{Profile, Role, ShopDistance};
pub use recipe::{Nutrition, RecipeIngredient, RecipeRequest, RecipeResponse};
pub use status::{Actor, OrderStatus};
