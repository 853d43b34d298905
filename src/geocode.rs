//! City geocoding via the Google Maps Geocoding API
//!
//! Coordinates are a nice-to-have for the map on the result page, so every
//! miss is reported as `Ok(None)`: no key configured, an empty result set or
//! a non-OK payload status all leave coordinates absent.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ExternalServiceError, Result};
use crate::models::Coordinates;

const API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Source of coordinates for a queried city name
///
/// The report assembly in `city_info` is generic over this seam so it can be
/// driven without the network in tests.
#[allow(async_fn_in_trait)]
pub trait CityLocator {
    /// Resolve a city name to coordinates
    async fn locate(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// Google Maps geocoding client
pub struct GeocodingClient {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GeocodingClient {
    /// Create a new client
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("CityScout/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.gmap_api_key.clone(),
        }
    }
}

impl CityLocator for GeocodingClient {
    async fn locate(&self, city: &str) -> Result<Option<Coordinates>> {
        let Some(api_key) = &self.api_key else {
            debug!("No Google Maps API key configured, skipping geocoding");
            return Ok(None);
        };

        let url = format!(
            "{API_URL}?address={}&key={api_key}",
            urlencoding::encode(city)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ExternalServiceError::ApiError(format!(
                "Geocoding API error {} for '{city}'",
                response.status()
            )));
        }

        let geocode: GeocodeResponse = response.json().await?;

        // Google reports misses (ZERO_RESULTS, REQUEST_DENIED, ...) in the
        // payload status with HTTP 200.
        if geocode.status != "OK" {
            debug!("Geocoding returned status {} for '{city}'", geocode.status);
            return Ok(None);
        }

        Ok(first_location(geocode))
    }
}

/// Take the best (first) result's location, if any
fn first_location(geocode: GeocodeResponse) -> Option<Coordinates> {
    geocode
        .results
        .into_iter()
        .next()
        .map(|result| result.geometry.location)
}
