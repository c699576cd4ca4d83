//! Catalog API client implementation.
//!
//! This module provides the client that fetches one page of artworks at a
//! time from the Art Institute of Chicago public API. It holds no state
//! between calls beyond the HTTP connection pool.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{Artwork, ArtworksResponse, Page};
use crate::config::ApiSettings;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("lazyart/", env!("CARGO_PKG_VERSION"));

/// The catalog API client.
#[derive(Debug, Clone)]
pub struct ArticClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
    /// Comma-separated fields requested for each artwork.
    fields: String,
}

impl ArticClient {
    /// Create a new client from the API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be built
    /// - The base URL does not parse
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = normalize_base_url(&settings.base_url);
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Self::build_http_client(settings.timeout_secs)?;
        Ok(Self {
            client,
            base_url,
            fields: settings.fields.clone(),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Network)
    }

    /// Fetch one page of artworks.
    ///
    /// Calls `GET /artworks?page=<n>&limit=<size>&fields=<list>`. The
    /// returned page carries the server's own pagination metadata, which
    /// wins over anything computed locally from the arguments.
    ///
    /// # Arguments
    ///
    /// * `page_number` - The one-based page number
    /// * `page_size` - Maximum number of records on the page
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `page_number` or `page_size` is zero
    /// - The request fails or times out
    /// - The server answers with a non-2xx status
    /// - The body is not valid JSON or breaks the page invariants
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<Page<Artwork>> {
        if page_number == 0 {
            return Err(ApiError::InvalidRequest("page number must be at least 1".to_string()));
        }
        if page_size == 0 {
            return Err(ApiError::InvalidRequest("page size must be at least 1".to_string()));
        }

        let url = self.page_url(page_number, page_size);
        let response: ArtworksResponse = self.get(&url).await?;
        let page = Page::from(response);

        let expected_offset = u64::from(page_number - 1) * u64::from(page_size);
        if page.offset != expected_offset || page.page_size != page_size {
            debug!(
                expected_offset,
                server_offset = page.offset,
                server_limit = page.page_size,
                "Server pagination differs from request, trusting server"
            );
        }

        if !page.is_consistent() {
            return Err(ApiError::InvalidResponse(format!(
                "page has {} records but limit {} and total {}",
                page.len(),
                page.page_size,
                page.total_records
            )));
        }

        debug!(
            "Fetched {} artworks (offset: {}, total: {})",
            page.len(),
            page.offset,
            page.total_records
        );
        Ok(page)
    }

    /// Build the listing URL for a page.
    fn page_url(&self, page_number: u32, page_size: u32) -> String {
        format!(
            "{}/artworks?page={}&limit={}&fields={}",
            self.base_url,
            page_number,
            page_size,
            urlencoding::encode(&self.fields)
        )
    }

    /// Perform a GET request and parse the JSON body.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Request failed: {}", e);
                ApiError::Network(e)
            })?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str::<T>(&body)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// The catalog answers errors with `{"status": .., "error": .., "detail": ..}`.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            let error = json.get("error").and_then(|v| v.as_str());
            let detail = json.get("detail").and_then(|v| v.as_str());
            let context = match (error, detail) {
                (Some(e), Some(d)) => Some(format!("{}: {}", e, d)),
                (Some(e), None) => Some(e.to_string()),
                (None, Some(d)) => Some(d.to_string()),
                (None, None) => None,
            };
            if let Some(context) = context {
                return ApiError::from_status(status, &context);
            }
        }

        ApiError::from_status(status, url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
