//! Centralized error types for LazyArt.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Catalog server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid catalog URL in configuration.".to_string(),
                ApiError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the catalog. Please try again.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is critical and prevents the browser from starting.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Api(ApiError::InvalidUrl(_)) | AppError::Terminal(_)
        )
    }

    /// Check if this error is recoverable by navigating or reloading.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
                | AppError::Api(ApiError::NotFound(_))
                | AppError::Api(ApiError::InvalidResponse(_))
        )
    }

    /// Process exit code for an error that ends the program: 2 when
    /// critical, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_critical() {
            2
        } else {
            1
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the configuration file or run 'lazyart --write-config' to reset it.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and press 'r' to reload."),
            AppError::Api(ApiError::Network(_)) => {
                Some("Check your internet connection and press 'r' to reload.")
            }
            AppError::Api(ApiError::ServerError(_)) | AppError::Api(ApiError::InvalidResponse(_)) => {
                Some("Press 'r' to reload the page.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_err = ApiError::RateLimited;
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("page 900".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("page 900"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_invalid_response() {
        let err = AppError::Api(ApiError::InvalidResponse("bad json".to_string()));
        assert!(err.user_message().contains("Unexpected response"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "display.page_size must be at least 1".to_string(),
        ));
        let msg = err.user_message();
        assert!(msg.contains("page_size"));
    }

    #[test]
    fn test_is_critical_config() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(err.is_critical());
    }

    #[test]
    fn test_is_not_critical_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        assert!(!err.is_critical());
    }

    #[test]
    fn test_is_recoverable_server_error() {
        let err = AppError::Api(ApiError::ServerError("HTTP 502".to_string()));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_is_not_recoverable_invalid_request() {
        let err = AppError::Api(ApiError::InvalidRequest("page 0".to_string()));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_suggested_action_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        let action = err.suggested_action();
        assert!(action.is_some());
        assert!(action.unwrap().contains("reload"));
    }

    #[test]
    fn test_suggested_action_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("x".to_string()));
        assert!(err.suggested_action().unwrap().contains("--write-config"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_exit_code_separates_critical_errors() {
        assert_eq!(AppError::Config(ConfigError::NoConfigDir).exit_code(), 2);
        assert_eq!(AppError::terminal("no tty").exit_code(), 2);
        let io = std::io::Error::other("disk full");
        assert_eq!(AppError::Io(io).exit_code(), 1);
    }
}
