//! Data models for city suggestions and their enrichments
//!
//! These are the internal shapes passed between the completion client, the
//! enrichment lookups and the web layer. The wire types for the HTTP API
//! live in the `api` module.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept per suggestion category
pub const MAX_SUGGESTIONS: usize = 5;

/// Suggestion lists for one city, as produced by the structured completion
///
/// All three lists are always present. The all-empty value doubles as the
/// fallback when the completion call fails.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityInfo {
    /// Landmark names, e.g. "Eiffel Tower"
    pub landmarks: Vec<String>,
    /// Activity suggestions, e.g. "Picnic along the Seine"
    pub activities: Vec<String>,
    /// Restaurant suggestions
    pub restaurants: Vec<String>,
}

/// A landmark together with its optional representative image
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Landmark {
    /// Landmark name as suggested by the completion
    pub name: String,
    /// Thumbnail URL from the encyclopedia lookup; `None` when the lookup
    /// failed or the article has no lead image
    pub image_url: Option<String>,
}

/// Geographic coordinates of the queried city
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Aggregate result for one city query
///
/// Always well formed: failed enrichments leave empty lists or absent
/// values behind instead of propagating.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CityReport {
    /// The city as queried (trimmed)
    pub city: String,
    /// Landmarks with their images, in completion order
    pub landmarks: Vec<Landmark>,
    /// Activity suggestions, in completion order
    pub activities: Vec<String>,
    /// Restaurant suggestions, in completion order
    pub restaurants: Vec<String>,
    /// City coordinates when geocoding succeeded
    pub coordinates: Option<Coordinates>,
}

impl CityInfo {
    /// The fallback value: every category present and empty
    #[must_use]
    pub fn empty() -> Self {
        Self {
            landmarks: Vec::new(),
            activities: Vec::new(),
            restaurants: Vec::new(),
        }
    }

    /// Check whether every category is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty() && self.activities.is_empty() && self.restaurants.is_empty()
    }

    /// Cap each category at [`MAX_SUGGESTIONS`] entries
    ///
    /// The completion is asked for exactly five per category, but the bound
    /// is enforced here rather than trusted.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.landmarks.truncate(MAX_SUGGESTIONS);
        self.activities.truncate(MAX_SUGGESTIONS);
        self.restaurants.truncate(MAX_SUGGESTIONS);
        self
    }
}
