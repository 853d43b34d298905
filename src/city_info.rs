//! City report orchestration
//!
//! One structured completion per query, then optional enrichment: an image
//! per landmark and coordinates for the city. Every outbound failure is
//! absorbed at this boundary, so the caller always receives a well formed
//! report and never an error.

use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::geocode::{CityLocator, GeocodingClient};
use crate::models::{CityInfo, CityReport, Landmark};
use crate::openai::OpenAiClient;
use crate::wikipedia::{ImageLookup, WikipediaClient};

/// Orchestrates the outbound calls behind one city query
pub struct CityInfoService {
    completion: OpenAiClient,
    wikipedia: WikipediaClient,
    geocoding: GeocodingClient,
}

impl CityInfoService {
    /// Create the service with one client per integration
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            completion: OpenAiClient::new(config),
            wikipedia: WikipediaClient::new(config),
            geocoding: GeocodingClient::new(config),
        }
    }

    /// Build the full report for a city
    ///
    /// A failed completion degrades to empty suggestion lists, a failed
    /// image lookup leaves that landmark without an image, and failed
    /// geocoding leaves coordinates absent.
    #[instrument(skip(self))]
    pub async fn fetch_city_info(&self, city: &str) -> CityReport {
        let info = match self.completion.suggestions(city).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Completion failed for '{city}': {e}");
                CityInfo::empty()
            }
        };

        build_report(&self.wikipedia, &self.geocoding, city, info).await
    }
}

/// Clamp the suggestion lists, attach landmark images and resolve the city
/// coordinates into the final report
///
/// Generic over the two lookup seams. A geocoding failure is logged and
/// leaves coordinates absent without touching the suggestion lists.
async fn build_report<L, G>(lookup: &L, locator: &G, city: &str, info: CityInfo) -> CityReport
where
    L: ImageLookup,
    G: CityLocator,
{
    let info = info.clamped();
    let landmarks = enrich_landmarks(lookup, info.landmarks).await;

    let coordinates = match locator.locate(city).await {
        Ok(coordinates) => coordinates,
        Err(e) => {
            warn!("Geocoding failed for '{city}': {e}");
            None
        }
    };

    info!(
        "Report for '{city}': {} landmarks, {} activities, {} restaurants, coordinates {}",
        landmarks.len(),
        info.activities.len(),
        info.restaurants.len(),
        if coordinates.is_some() {
            "resolved"
        } else {
            "absent"
        }
    );

    CityReport {
        city: city.to_string(),
        landmarks,
        activities: info.activities,
        restaurants: info.restaurants,
        coordinates,
    }
}

/// Attach an image to each landmark, one lookup at a time in source order
///
/// A failed lookup is logged and leaves that landmark without an image; it
/// never aborts the remaining lookups.
async fn enrich_landmarks<L: ImageLookup>(lookup: &L, names: Vec<String>) -> Vec<Landmark> {
    let mut landmarks = Vec::with_capacity(names.len());

    for name in names {
        let image_url = match lookup.page_image(&name).await {
            Ok(image_url) => image_url,
            Err(e) => {
                warn!("Image lookup failed for '{name}': {e}");
                None
            }
        };
        landmarks.push(Landmark { name, image_url });
    }

    landmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExternalServiceError, Result};
    use crate::models::Coordinates;
    use std::cell::RefCell;

    /// Scripted lookup double: titles containing "down" fail, titles
    /// containing "plain" have no image, everything else resolves.
    struct ScriptedLookup {
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedLookup {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageLookup for ScriptedLookup {
        async fn page_image(&self, title: &str) -> Result<Option<String>> {
            self.seen.borrow_mut().push(title.to_string());
            if title.contains("down") {
                return Err(ExternalServiceError::NetworkError(
                    "connection refused".to_string(),
                ));
            }
            if title.contains("plain") {
                return Ok(None);
            }
            Ok(Some(format!("https://img.example/{title}.jpg")))
        }
    }

    /// Locator double standing in for an unreachable geocoding endpoint.
    struct UnreachableLocator;

    impl CityLocator for UnreachableLocator {
        async fn locate(&self, _city: &str) -> Result<Option<Coordinates>> {
            Err(ExternalServiceError::NetworkError(
                "connection refused".to_string(),
            ))
        }
    }

    /// Locator double answering every city with the same fixed point.
    struct PinnedLocator(Coordinates);

    impl CityLocator for PinnedLocator {
        async fn locate(&self, _city: &str) -> Result<Option<Coordinates>> {
            Ok(Some(self.0))
        }
    }

    #[tokio::test]
    async fn test_enrich_preserves_order_and_isolates_failures() {
        let lookup = ScriptedLookup::new();
        let names = vec![
            "Eiffel Tower".to_string(),
            "down museum".to_string(),
            "plain chapel".to_string(),
            "Louvre".to_string(),
        ];

        let landmarks = enrich_landmarks(&lookup, names.clone()).await;

        let enriched_names: Vec<&str> = landmarks.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(enriched_names, names);
        assert_eq!(
            landmarks[0].image_url.as_deref(),
            Some("https://img.example/Eiffel Tower.jpg")
        );
        assert!(landmarks[1].image_url.is_none());
        assert!(landmarks[2].image_url.is_none());
        assert_eq!(
            landmarks[3].image_url.as_deref(),
            Some("https://img.example/Louvre.jpg")
        );

        // One lookup per landmark, in source order
        assert_eq!(*lookup.seen.borrow(), names);
    }

    #[tokio::test]
    async fn test_enrich_with_no_landmarks_does_no_lookups() {
        let lookup = ScriptedLookup::new();
        let landmarks = enrich_landmarks(&lookup, Vec::new()).await;
        assert!(landmarks.is_empty());
        assert!(lookup.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_geocoding_failure_leaves_coordinates_absent() {
        // The suggestion lists and landmark images must come through
        // untouched when only the geocoding call fails.
        let lookup = ScriptedLookup::new();
        let info = CityInfo {
            landmarks: vec!["Belem Tower".to_string()],
            activities: vec!["Tram 28 ride".to_string()],
            restaurants: vec!["Time Out Market".to_string()],
        };

        let report = build_report(&lookup, &UnreachableLocator, "Lisbon", info).await;

        assert!(report.coordinates.is_none());
        assert_eq!(report.city, "Lisbon");
        assert_eq!(
            report.landmarks[0].image_url.as_deref(),
            Some("https://img.example/Belem Tower.jpg")
        );
        assert_eq!(report.activities, vec!["Tram 28 ride"]);
        assert_eq!(report.restaurants, vec!["Time Out Market"]);
    }

    #[tokio::test]
    async fn test_resolved_coordinates_reach_the_report() {
        let lookup = ScriptedLookup::new();
        let pinned = Coordinates {
            lat: 38.7223,
            lng: -9.1393,
        };

        let report =
            build_report(&lookup, &PinnedLocator(pinned), "Lisbon", CityInfo::empty()).await;

        assert_eq!(report.coordinates, Some(pinned));
        assert!(report.landmarks.is_empty());
        assert!(lookup.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_city_info_degrades_without_credentials() {
        // With no API keys configured every integration degrades in place
        // and the report is still well formed. Nothing touches the network.
        let service = CityInfoService::new(&AppConfig::default());
        let report = service.fetch_city_info("Paris").await;

        assert_eq!(report.city, "Paris");
        assert!(report.landmarks.is_empty());
        assert!(report.activities.is_empty());
        assert!(report.restaurants.is_empty());
        assert!(report.coordinates.is_none());
    }
}
