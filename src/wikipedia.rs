//! Landmark image lookup against the Wikipedia pageimages API
//!
//! One request per landmark name resolves the article (following redirects)
//! and returns its lead image thumbnail, when there is one.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ExternalServiceError, Result};

const API_URL: &str = "https://en.wikipedia.org/w/api.php";
const THUMBNAIL_SIZE: u32 = 500;

/// Source of one representative image per landmark name
///
/// The enrichment loop in `city_info` is generic over this seam so it can be
/// driven without the network in tests.
#[allow(async_fn_in_trait)]
pub trait ImageLookup {
    /// Look up the lead image thumbnail URL for the article with this title
    async fn page_image(&self, title: &str) -> Result<Option<String>>;
}

/// Wikipedia pageimages client
pub struct WikipediaClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PageImagesResponse {
    query: Option<PageImagesQuery>,
}

#[derive(Debug, Deserialize)]
struct PageImagesQuery {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

impl WikipediaClient {
    /// Create a new client
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("CityScout/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl ImageLookup for WikipediaClient {
    async fn page_image(&self, title: &str) -> Result<Option<String>> {
        let url = format!(
            "{API_URL}?action=query&format=json&prop=pageimages&piprop=thumbnail&pithumbsize={THUMBNAIL_SIZE}&redirects=1&titles={}",
            urlencoding::encode(title)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ExternalServiceError::ApiError(format!(
                "Wikipedia API error {} for '{title}'",
                response.status()
            )));
        }

        let pages: PageImagesResponse = response.json().await?;
        let image = first_thumbnail(&pages);

        match &image {
            Some(source) => debug!("Found image for '{title}': {source}"),
            None => debug!("No image available for '{title}'"),
        }

        Ok(image)
    }
}

/// Pull the first thumbnail out of the keyed page map
///
/// The map holds one entry per queried title, keyed by page id, so the first
/// page with a thumbnail is the answer. Missing articles come back with a
/// negative page id and no thumbnail.
fn first_thumbnail(response: &PageImagesResponse) -> Option<String> {
    response
        .query
        .as_ref()?
        .pages
        .values()
        .find_map(|page| page.thumbnail.as_ref())
        .map(|thumbnail| thumbnail.source.clone())
}
