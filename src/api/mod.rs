use std::sync::Arc;

use axum::{Form, extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::city_info::CityInfoService;
use crate::config::AppConfig;
use crate::models::{CityReport, Coordinates, Landmark};

/// Shared state behind every handler: the configuration plus the service
/// that fans out to the external APIs
pub struct AppState {
    pub config: AppConfig,
    pub service: CityInfoService,
}

impl AppState {
    /// Build the service stack from configuration
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let service = CityInfoService::new(&config);
        Self { config, service }
    }
}

/// Form payload of a city query
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct ApiLandmark {
    pub name: String,
    pub image_url: Option<String>,
}

/// Coordinates block of the response: always present, latitude and
/// longitude either both set or both null
#[derive(Debug, Serialize)]
pub struct ApiCoordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// JSON payload rendered by the result page
#[derive(Debug, Serialize)]
pub struct CityInfoResponse {
    pub city: String,
    pub landmarks: Vec<ApiLandmark>,
    pub activities: Vec<String>,
    pub restaurants: Vec<String>,
    /// Echoed so the result page can embed a map; null when not configured
    pub gmap_api_key: Option<String>,
    pub coordinates: ApiCoordinates,
}

impl From<Landmark> for ApiLandmark {
    fn from(landmark: Landmark) -> Self {
        Self {
            name: landmark.name,
            image_url: landmark.image_url,
        }
    }
}

impl From<Option<Coordinates>> for ApiCoordinates {
    fn from(coordinates: Option<Coordinates>) -> Self {
        match coordinates {
            Some(coordinates) => Self {
                lat: Some(coordinates.lat),
                lng: Some(coordinates.lng),
            },
            None => Self {
                lat: None,
                lng: None,
            },
        }
    }
}

impl CityInfoResponse {
    fn from_report(report: CityReport, gmap_api_key: Option<String>) -> Self {
        Self {
            city: report.city,
            landmarks: report.landmarks.into_iter().map(ApiLandmark::from).collect(),
            activities: report.activities,
            restaurants: report.restaurants,
            gmap_api_key,
            coordinates: report.coordinates.into(),
        }
    }
}

/// `POST /city-info` and its alias `POST /`
///
/// An empty or whitespace-only city is rejected with 422 before any
/// outbound call. Outbound failures never change the status; they only
/// leave empty fields in the payload.
pub(crate) async fn city_info(
    State(state): State<Arc<AppState>>,
    Form(query): Form<CityQuery>,
) -> Result<Json<CityInfoResponse>, StatusCode> {
    let city = query.city.trim();
    if city.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let report = state.service.fetch_city_info(city).await;
    Ok(Json(CityInfoResponse::from_report(
        report,
        state.config.gmap_api_key.clone(),
    )))
}
