//! Configuration module for the QR client.
//!
//! Holds the generator base URL, the optional request timeout and the payload
//! policy for empty optional fields.

use std::time::Duration;
use url::Url;

use crate::errors::{QrError, QrResult};
use crate::types::OptionalFields;

/// Default base URL for the NBS QR API.
pub const DEFAULT_BASE_URL: &str = "https://nbs.rs/QRcode/api/qr/v1";

/// Path of the generate endpoint, relative to the base URL.
pub const GENERATE_PATH: &str = "gen";

/// Configuration for the QR client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrConfig {
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// How empty optional fields are sent.
    pub optional_fields: OptionalFields,
}

impl QrConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> QrConfigBuilder {
        QrConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `NBS_QR_BASE_URL` (optional): Custom base URL
    /// - `NBS_QR_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> QrResult<Self> {
        let mut builder = QrConfigBuilder::new();

        if let Ok(base_url) = std::env::var("NBS_QR_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("NBS_QR_TIMEOUT") {
            let secs = timeout_str.trim().parse::<u64>().map_err(|_| {
                QrError::configuration(format!(
                    "NBS_QR_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            builder = builder.timeout_secs(secs);
        }

        builder.build()
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            optional_fields: OptionalFields::default(),
        }
    }
}

/// Builder for `QrConfig`.
#[derive(Debug, Default)]
pub struct QrConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    optional_fields: Option<OptionalFields>,
}

impl QrConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the optional-field policy.
    pub fn optional_fields(mut self, policy: OptionalFields) -> Self {
        self.optional_fields = Some(policy);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> QrResult<QrConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(QrError::configuration(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if parsed.scheme() == "http" {
            tracing::warn!(base_url = %base_url, "QR API base URL is not using HTTPS");
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(QrError::configuration("Timeout must be greater than zero"));
        }

        Ok(QrConfig {
            base_url,
            timeout: self.timeout,
            optional_fields: self.optional_fields.unwrap_or_default(),
        })
    }
}
