//! Open-Meteo geocoding client.
//!
//! Turns free-text place names into [`Location`]s, either as a ranked
//! suggestion list or as a single best match. Pure request/transform: no
//! retries, no local fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Location;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Queries shorter than this never hit the network.
const MIN_QUERY_CHARS: usize = 3;
const SUGGESTION_COUNT: u8 = 5;

/// Seam for the interaction controller, so it can be driven by stubs in
/// tests.
#[async_trait]
pub trait GeocodeSource: Send + Sync {
    /// Up to five ranked candidate matches for a partial query.
    async fn suggest(&self, query: &str) -> Result<Vec<Location>>;

    /// The single best match for a submitted query.
    async fn resolve(&self, query: &str) -> Result<Location>;
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODING_URL)
    }

    /// Point the client at a different endpoint (used by tests and config).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn search(&self, query: &str, count: u8) -> Result<Vec<Location>> {
        let count = count.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = res.text().await?;

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Decode(format!("geocoding JSON: {e}")))?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect())
    }
}

#[async_trait]
impl GeocodeSource for GeocodingClient {
    async fn suggest(&self, query: &str) -> Result<Vec<Location>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        tracing::debug!(query, "fetching suggestions");
        self.search(query, SUGGESTION_COUNT).await
    }

    async fn resolve(&self, query: &str) -> Result<Location> {
        tracing::debug!(query, "resolving city");

        self.search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(query.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country_code: Option<String>,
}

impl From<GeoResult> for Location {
    fn from(r: GeoResult) -> Self {
        Location {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
            region: r.admin1,
            country_code: r.country_code,
        }
    }
}
