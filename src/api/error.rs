//! API error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when fetching a page from the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Catalog server error or unexpected status.
    #[error("Catalog server error: {0}")]
    ServerError(String),

    /// Network, timeout or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request parameters were rejected before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Malformed or inconsistent response body.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
