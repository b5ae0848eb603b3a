//! Error types for DineDeck.
//!
//! This module defines the centralized error type [`DineError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! An empty result page is not an error. It renders as the empty-state view.

use thiserror::Error;

/// The main error type for DineDeck operations.
///
/// Transport, authentication, validation and persistence failures all end up here.
/// The controller never lets these escape to the presentation layer; the worker
/// converts them into [`WorkerResponse`](crate::worker::WorkerResponse) variants.
///
/// # Examples
///
/// ```
/// use dinedeck::DineError;
///
/// fn validate() -> Result<(), DineError> {
///     Err(DineError::Validation("Please enter a valid email address".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DineError {
    /// The request never produced an HTTP response (connection refused, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the token and re-authentication with stored
    /// credentials failed. The session has been cleared.
    #[error("Authentication expired. Please log in again.")]
    AuthExpired,

    /// Form-level input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server answered with a non-success status.
    ///
    /// `message` carries the `message` field of the JSON error body when present.
    #[error("API error ({status}){}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if the body had one.
        message: Option<String>,
    },

    /// A response or stored value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Reading from or writing to a key/value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl DineError {
    /// Returns the server-provided message for API errors, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DineError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for DineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for DineDeck operations.
pub type Result<T> = std::result::Result<T, DineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_server_message() {
        let err = DineError::Api {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.to_string(), "API error (409): Email already registered");
        assert_eq!(err.server_message(), Some("Email already registered"));
    }

    #[test]
    fn api_error_display_without_message() {
        let err = DineError::Api { status: 500, message: None };
        assert_eq!(err.to_string(), "API error (500)");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn decode_error_from_serde() {
        let err: DineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DineError::Decode(_)));
    }
}
