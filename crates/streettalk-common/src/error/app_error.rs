//! Application error types
//!
//! Unified error handling for the entire application.

use serde::Serialize;
use std::fmt;
use streettalk_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for notices and logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the user caused this error and can act on it
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_validation() || e.is_media() || e.is_not_found(),
            _ => false,
        }
    }

    /// Check if retrying the same operation may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_conflict())
    }

    /// Build the notice shown to the user for this error
    #[must_use]
    pub fn notice(&self) -> UserNotice {
        UserNotice::from(self)
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Dismissible message surfaced to the user (e.g. "Could not read image")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserNotice {
    pub code: String,
    pub message: String,
    /// Media failures only reject the attachment, so the notice can be dismissed
    pub dismissible: bool,
}

impl From<&AppError> for UserNotice {
    fn from(err: &AppError) -> Self {
        let message = if err.is_user_error() {
            err.to_string()
        } else {
            "Something went wrong. Please try again.".to_string()
        };

        Self {
            code: err.error_code().to_string(),
            message,
            dismissible: err.is_user_error() || err.is_retryable(),
        }
    }
}

impl From<AppError> for UserNotice {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
