//! Customer and shop owner profiles.

use serde::{Deserialize, Serialize};

use super::geo::Coordinates;
use super::item::StoreType;
use super::phone::Phone;

/// Which side of the marketplace a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Generates recipes and sends shopping lists.
    Customer,
    /// Receives, fulfills, and annotates shopping lists.
    Owner,
}

/// A customer or shop owner profile.
///
/// The phone number is the immutable identity key; everything else is
/// created-or-merged on every successful sign-in with last-write-wins
/// semantics and no conflict detection. `shop_name` and `store_type` are
/// owner-only and left `None` on customer profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Marketplace side.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Identity key; 10 digits, immutable.
    pub phone: Phone,
    /// Free-text location as entered or reverse-geocoded.
    #[serde(default)]
    pub location: String,
    /// Latitude, if geolocation or geocoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude, if geolocation or geocoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Shop display name (owner only).
    #[serde(rename = "shopName", skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Which list bucket this shop receives (owner only).
    #[serde(rename = "storeType", skip_serializing_if = "Option::is_none")]
    pub store_type: Option<StoreType>,
}

impl Profile {
    /// The profile's coordinates, if both components are present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }
}

/// A shop ranked by distance from a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDistance {
    /// Shop display name.
    #[serde(rename = "shopName")]
    pub shop_name: String,
    /// Owner's phone; the key orders are addressed to.
    pub phone: Phone,
    /// Which list bucket this shop receives.
    #[serde(rename = "storeType")]
    pub store_type: StoreType,
    /// Great-circle distance from the customer in kilometers.
    #[serde(rename = "distance")]
    pub distance_km: f64,
}
