//! Error types for the NBS IPS QR client.
//!
//! Field validation failures are not errors here: they are ordinary
//! [`ValidationResult`](crate::validation::ValidationResult) values and
//! [`FieldError`](crate::types::FieldError) records. [`QrError`] covers
//! everything that can go wrong once a payload leaves the process.

use thiserror::Error;

pub use crate::transport::TransportError;

/// Result type alias for QR client operations.
pub type QrResult<T> = Result<T, QrError>;

/// Error type for QR client operations.
#[derive(Debug, Error)]
pub enum QrError {
    /// Configuration error (invalid base URL, unusable timeout, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status.
    #[error("QR generation failed (HTTP {status})")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded, for diagnostics.
        body: Option<String>,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl QrError {
    /// Returns the HTTP status code, if the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            QrError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure happened on the wire rather than in the
    /// API's answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, QrError::Transport(_))
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        QrError::Configuration {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error from a raw body.
    pub fn http(status: u16, body: &[u8]) -> Self {
        let body = if body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(body).into_owned())
        };
        QrError::Http { status, body }
    }
}

impl From<reqwest::Error> for QrError {
    fn from(err: reqwest::Error) -> Self {
        QrError::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for QrError {
    fn from(err: serde_json::Error) -> Self {
        QrError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for QrError {
    fn from(err: url::ParseError) -> Self {
        QrError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
