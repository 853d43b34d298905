use thiserror::Error;

/// Error type for the outbound service integrations
///
/// The orchestration boundary turns every variant into an empty or absent
/// value; none of them surfaces as an HTTP error.
#[derive(Error, Debug)]
pub enum ExternalServiceError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Rate limit error: {0}")]
    RateLimitError(String),
}

impl From<reqwest::Error> for ExternalServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExternalServiceError::ParseError(err.to_string())
        } else {
            ExternalServiceError::NetworkError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ExternalServiceError>;
