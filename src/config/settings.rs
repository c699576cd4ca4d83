//! Configuration sections.

use serde::{Deserialize, Serialize};

use crate::api::types::DEFAULT_FIELDS;

/// Default catalog API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Catalog API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the catalog API, without the `/artworks` suffix.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Comma-separated list of fields to request.
    pub fields: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fields: DEFAULT_FIELDS.to_string(),
        }
    }
}

/// Table and paginator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Rows per page on startup.
    pub page_size: u32,
    /// Choices offered by the rows-per-page switcher.
    pub rows_per_page_options: Vec<u32>,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            rows_per_page_options: vec![10, 25, 50],
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}
