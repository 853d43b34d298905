//! Runtime configuration for the CityScout service
//!
//! Everything is read from environment variables once at startup. A missing
//! credential degrades the matching feature instead of failing startup, so
//! the server always comes up.

use std::env;

use tracing::warn;

/// Application configuration, built once in `main` and shared through the
/// router state
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `OPENAI_API_KEY`; without it every completion falls back to the empty
    /// suggestion set
    pub openai_api_key: Option<String>,
    /// `OPENAI_BASE_URL`, for OpenAI-compatible gateways
    pub openai_base_url: String,
    /// `OPENAI_MODEL`
    pub openai_model: String,
    /// `GMAP_API_KEY`, used for geocoding and echoed to the result page;
    /// without it coordinates stay absent
    pub gmap_api_key: Option<String>,
    /// `REQUEST_TIMEOUT_SECS` applied to every outbound HTTP client
    pub request_timeout_secs: u64,
    /// `PORT` the server binds on
    pub port: u16,
    /// `STATIC_DIR` holding the entry and result pages
    pub static_dir: String,
}

// Default value functions
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-2024-08-06".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            gmap_api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Absent credentials stay `None`; malformed numeric overrides fall back
    /// to their default with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_base_url: optional_var("OPENAI_BASE_URL")
                .unwrap_or_else(default_openai_base_url),
            openai_model: optional_var("OPENAI_MODEL").unwrap_or_else(default_openai_model),
            gmap_api_key: optional_var("GMAP_API_KEY"),
            request_timeout_secs: numeric_var(
                "REQUEST_TIMEOUT_SECS",
                default_request_timeout_secs(),
            ),
            port: numeric_var("PORT", default_port()),
            static_dir: optional_var("STATIC_DIR").unwrap_or_else(default_static_dir),
        }
    }
}

/// Read an environment variable, treating blank values as absent
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read a numeric environment variable, falling back to the default when it
/// is absent or unparseable
fn numeric_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring invalid {name}='{raw}', falling back to {default}");
            default
        }
    }
}
