//! Profile repository: customers and owners keyed by phone number.

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::warn;

use portion_perfect_core::{Phone, Profile, Role};

use super::RepositoryError;
use crate::store::DocumentStore;

/// Collection name for a role.
const fn collection(role: Role) -> &'static str {
    match role {
        Role::Customer => "customers",
        Role::Owner => "owners",
    }
}

/// Repository for profile documents.
///
/// Profiles are created-or-merged on every successful sign-in: the phone
/// number is the document key and immutable identity, everything else is
/// last-write-wins with no conflict detection.
#[derive(Debug, Clone)]
pub struct ProfileRepository<S> {
    store: S,
}

impl<S: DocumentStore> ProfileRepository<S> {
    /// Create a new profile repository over a store handle.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Create-or-merge a profile into its role collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if serialization or the write fails.
    pub async fn sync(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let mut fields = to_fields(serde_json::to_value(profile).map_err(crate::store::StoreError::from)?);
        fields.insert(
            "updatedAt".to_owned(),
            Value::String(Utc::now().to_rfc3339()),
        );

        self.store
            .set_merged(collection(profile.role), profile.phone.as_str(), fields)
            .await?;
        Ok(())
    }

    /// Point lookup by phone number.
    ///
    /// A miss means "new user" to callers, not a failure.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Corrupt` if a stored document does not
    /// deserialize, `RepositoryError::Store` if the read fails.
    pub async fn get_by_phone(
        &self,
        phone: &Phone,
        role: Role,
    ) -> Result<Option<Profile>, RepositoryError> {
        let Some(doc) = self.store.get(collection(role), phone.as_str()).await? else {
            return Ok(None);
        };

        let profile =
            serde_json::from_value(doc).map_err(|e| RepositoryError::Corrupt {
                collection: collection(role).to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Some(profile))
    }

    /// Every registered shop owner, for proximity ranking.
    ///
    /// Documents that fail to deserialize are logged and skipped rather than
    /// failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection scan fails.
    pub async fn all_owners(&self) -> Result<Vec<Profile>, RepositoryError> {
        let snapshot = self.store.list(collection(Role::Owner)).await?;

        Ok(snapshot
            .into_iter()
            .filter_map(|(key, doc)| match serde_json::from_value(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(key, error = %e, "skipping corrupt owner profile");
                    None
                }
            })
            .collect())
    }
}

/// Unwrap a serialized struct into its top-level fields.
fn to_fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
