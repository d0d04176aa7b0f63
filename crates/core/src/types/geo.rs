//! Geographic coordinates and the proximity calculator.

use serde::{Deserialize, Serialize};

use super::profile::{Profile, ShopDistance};

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula. Pure and deterministic; there is no failure mode for
/// any pair of finite inputs.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rank shop owner profiles by distance from a customer, ascending.
///
/// Owners without coordinates or without the owner-only profile fields are
/// skipped rather than ranked at an arbitrary distance.
#[must_use]
pub fn rank_shops(customer: Coordinates, owners: &[Profile]) -> Vec<ShopDistance> {
    let mut ranked: Vec<ShopDistance> = owners
        .iter()
        .filter_map(|owner| {
            let location = owner.coordinates()?;
            Some(ShopDistance {
                shop_name: owner.shop_name.clone().unwrap_or_else(|| "Unknown Shop".to_owned()),
                phone: owner.phone.clone(),
                store_type: owner.store_type?,
                distance_km: haversine_km(customer, location),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
