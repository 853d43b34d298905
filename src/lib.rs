//! `CityScout` - city trip planning with AI-generated sightseeing suggestions
//!
//! This library wires a small web frontend to three outbound integrations:
//! an OpenAI structured completion for landmark, activity and restaurant
//! suggestions, a Wikipedia image lookup per landmark, and Google Maps
//! geocoding for the queried city. Failures in any of them degrade to empty
//! values instead of error responses.

pub mod api;
pub mod city_info;
pub mod config;
pub mod error;
pub mod geocode;
pub mod models;
pub mod openai;
pub mod web;
pub mod wikipedia;

// Re-export core types for public API
pub use api::{AppState, CityInfoResponse, CityQuery};
pub use city_info::CityInfoService;
pub use config::AppConfig;
pub use error::ExternalServiceError;
pub use geocode::GeocodingClient;
pub use models::{CityInfo, CityReport, Coordinates, Landmark};
pub use openai::OpenAiClient;
pub use wikipedia::WikipediaClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExternalServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
