//! Nominatim geocoding client.
//!
//! Best-effort by contract: a failed or empty lookup never blocks profile
//! submission. Callers fall back to [`coordinate_text`] for display or leave
//! the location text as the user typed it.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;

use portion_perfect_core::Coordinates;

use crate::config::SyncConfig;

/// Errors that can occur when talking to the geocoder.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response field did not parse.
    #[error("parse error: {0}")]
    Parse(String),
}

/// One result from the Nominatim search endpoint.
///
/// Coordinates come back as strings on the wire.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// A result from the Nominatim reverse endpoint.
#[derive(Debug, Deserialize)]
struct ReverseResult {
    display_name: Option<String>,
}

/// Geocoding client for the OpenStreetMap Nominatim API.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocoderClient {
    /// Create a new geocoder client.
    ///
    /// Nominatim requires an identifying `User-Agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &SyncConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.geocoder_user_agent)
                .map_err(|e| GeocodeError::Parse(format!("invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.geocoder_base_url.clone(),
        })
    }

    /// Resolve free-text address to coordinates. `Ok(None)` on no match.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError` on transport failure or an unparseable
    /// response; callers log and degrade rather than surface this.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let results: Vec<SearchResult> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", address), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(first) = results.into_iter().next() else {
            return Ok(None);
        };

        let lat = first
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::Parse(format!("bad latitude {:?}: {e}", first.lat)))?;
        let lng = first
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::Parse(format!("bad longitude {:?}: {e}", first.lon)))?;

        Ok(Some(Coordinates::new(lat, lng)))
    }

    /// Resolve coordinates to a display address. `Ok(None)` on no match.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError` on transport failure.
    pub async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<String>, GeocodeError> {
        let result: ReverseResult = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json"),
                ("lat", &coords.lat.to_string()),
                ("lon", &coords.lng.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(result.display_name)
    }
}

/// The raw-coordinate fallback shown when geocoding degrades.
#[must_use]
pub fn coordinate_text(coords: Coordinates) -> String {
    format!("{:.4}, {:.4}", coords.lat, coords.lng)
}
