//! OpenAI chat completion client with structured output
//!
//! A single request per city asks for five landmarks, five activities and
//! five restaurants. The response is constrained by a strict JSON schema so
//! the content parses straight into [`CityInfo`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{ExternalServiceError, Result};
use crate::models::CityInfo;

const SYSTEM_PROMPT: &str =
    "Provide information about landmarks, activities and restaurants in the given city.";

/// OpenAI chat completions client
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Strict schema the completion content must follow
fn city_info_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "landmarks": { "type": "array", "items": { "type": "string" } },
            "activities": { "type": "array", "items": { "type": "string" } },
            "restaurants": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["landmarks", "activities", "restaurants"],
        "additionalProperties": false
    })
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("CityScout/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
        }
    }

    /// Ask the completion API for suggestion lists for a city
    ///
    /// Fails with `AuthenticationError` before any network traffic when no
    /// API key is configured.
    pub async fn suggestions(&self, city: &str) -> Result<CityInfo> {
        let Some(api_key) = &self.api_key else {
            return Err(ExternalServiceError::AuthenticationError(
                "No OpenAI API key configured".to_string(),
            ));
        };

        info!("Requesting suggestions for '{city}' from model {}", self.model);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Provide top 5 landmarks, 5 fun activities and 5 restaurants in {city}."
                    ),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "city_info",
                    strict: true,
                    schema: city_info_schema(),
                },
            },
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                401 => Err(ExternalServiceError::AuthenticationError(
                    "OpenAI rejected the API key".to_string(),
                )),
                429 => Err(ExternalServiceError::RateLimitError(
                    "OpenAI rate limit exceeded".to_string(),
                )),
                _ => Err(ExternalServiceError::ApiError(format!(
                    "OpenAI API error {status}: {error_text}"
                ))),
            };
        }

        let completion: ChatResponse = response.json().await?;
        let info = parse_completion(&completion)?;

        debug!(
            "Model returned {} landmarks, {} activities, {} restaurants for '{city}'",
            info.landmarks.len(),
            info.activities.len(),
            info.restaurants.len()
        );

        Ok(info)
    }
}

/// Extract the structured content of the first choice
fn parse_completion(completion: &ChatResponse) -> Result<CityInfo> {
    let content = completion
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .ok_or_else(|| {
            ExternalServiceError::ParseError(
                "Completion response contained no message content".to_string(),
            )
        })?;

    serde_json::from_str(content).map_err(|e| {
        ExternalServiceError::ParseError(format!(
            "Completion content did not match the expected schema: {e}"
        ))
    })
}

/// Split a free-text completion into landmark and activity lists
///
/// Retained from before structured outputs were available: a case-insensitive
/// `landmarks:` or `activities:` line selects the target list, and numbered
/// lines `1.` through `5.` contribute the text after the two-character
/// prefix. Numbered lines before the first header are ignored.
#[must_use]
pub fn parse_text_response(content: &str) -> (Vec<String>, Vec<String>) {
    enum Section {
        None,
        Landmarks,
        Activities,
    }

    let mut landmarks = Vec::new();
    let mut activities = Vec::new();
    let mut section = Section::None;

    for line in content.lines() {
        let line = line.trim();
        let lower = line.to_lowercase();

        if lower.starts_with("landmarks:") {
            section = Section::Landmarks;
        } else if lower.starts_with("activities:") {
            section = Section::Activities;
        } else if ["1.", "2.", "3.", "4.", "5."]
            .iter()
            .any(|prefix| line.starts_with(prefix))
        {
            let item = line[2..].trim().to_string();
            match section {
                Section::Landmarks => landmarks.push(item),
                Section::Activities => activities.push(item),
                Section::None => {}
            }
        }
    }

    (landmarks, activities)
}
