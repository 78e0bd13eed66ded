//! Error types for the Mailjet adapter.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the Mailjet API.
#[derive(Error, Debug)]
pub enum MailjetError {
    /// The remote call reported failure
    #[error("Mailjet request failed (status {status}): {reason}")]
    Request { status: u16, reason: String },

    /// Contact data or a metadata field definition was rejected locally
    #[error("Invalid contact data: {0}")]
    InvalidContactData(String),

    /// The remote call succeeded but returned no records
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// HTTP transport failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value object rejected its input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Generic error with context
    #[error("Mailjet adapter error: {0}")]
    Other(String),
}

impl MailjetError {
    /// Whether this is a request failure the remote reported as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Request { status: 404, .. })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with MailjetError
pub type MailjetResult<T> = Result<T, MailjetError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
