//! Configuration management for LazyArt.
//!
//! This module handles loading, validating and saving the TOML configuration
//! file. Every field has a default, so a missing file or a partial file is
//! fine.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{
    ApiSettings, DisplaySettings, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TICK_RATE_MS,
    DEFAULT_TIMEOUT_SECS,
};

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "LAZYART_CONFIG";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("Failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file could not be written.
    #[error("Failed to write configuration file: {0}")]
    WriteError(std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Catalog API settings.
    pub api: ApiSettings,
    /// Table and paginator settings.
    pub display: DisplaySettings,
}

impl Config {
    /// Get the configuration file path.
    ///
    /// Uses `LAZYART_CONFIG` if set, otherwise the platform config directory
    /// with `lazyart/config.toml` appended.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("lazyart").join("config.toml"))
    }

    /// Load the configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load and validate the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate the configuration, normalizing what can be normalized.
    ///
    /// A page size missing from the rows-per-page options is inserted in
    /// sorted position; duplicates in the options are removed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - The base URL is empty or not http(s)
    /// - The timeout or page size is zero
    /// - The rows-per-page options are empty or contain zero
    pub fn validate(&mut self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url '{}' must start with http:// or https://",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.display.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "display.page_size must be at least 1".to_string(),
            ));
        }
        if self.display.rows_per_page_options.is_empty() {
            return Err(ConfigError::ValidationError(
                "display.rows_per_page_options cannot be empty".to_string(),
            ));
        }
        if self.display.rows_per_page_options.contains(&0) {
            return Err(ConfigError::ValidationError(
                "display.rows_per_page_options cannot contain 0".to_string(),
            ));
        }

        let options = &mut self.display.rows_per_page_options;
        if !options.contains(&self.display.page_size) {
            options.push(self.display.page_size);
        }
        options.sort_unstable();
        options.dedup();

        Ok(())
    }

    /// Apply a page size override, keeping the options consistent.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        self.display.page_size = page_size;
        self.validate()?;
        Ok(self)
    }

    /// Apply a base URL override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.api.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }
}
