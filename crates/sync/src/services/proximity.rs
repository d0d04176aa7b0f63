//! Proximity ranking of registered shops.

use tracing::debug;

use portion_perfect_core::{Profile, ShopDistance, geo};

use crate::db::{ProfileRepository, RepositoryError};
use crate::store::DocumentStore;

/// Ranks registered shops by distance from a customer.
#[derive(Debug, Clone)]
pub struct ProximityService<S> {
    profiles: ProfileRepository<S>,
}

impl<S: DocumentStore> ProximityService<S> {
    /// Create a proximity service over the profile repository.
    pub const fn new(profiles: ProfileRepository<S>) -> Self {
        Self { profiles }
    }

    /// Every located shop, nearest first.
    ///
    /// Empty when the customer has no coordinates - the UI simply shows no
    /// vendor list rather than failing the whole view. Owners without
    /// coordinates are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the owner listing fails.
    pub async fn nearby_shops(
        &self,
        customer: &Profile,
    ) -> Result<Vec<ShopDistance>, RepositoryError> {
        let Some(here) = customer.coordinates() else {
            debug!(phone = %customer.phone, "customer has no coordinates; skipping proximity");
            return Ok(Vec::new());
        };

        let owners = self.profiles.all_owners().await?;
        Ok(geo::rank_shops(here, &owners))
    }
}
