//! NBS QR API client.
//!
//! Provides the main client interface: the generate service for callers that
//! already hold a [`Payload`](crate::types::Payload), and the submit
//! controller for callers driving a form.

use std::sync::Arc;

use crate::config::{QrConfig, QrConfigBuilder};
use crate::controller::SubmitController;
use crate::errors::{QrError, QrResult};
use crate::services::GenerateService;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::OptionalFields;

/// The main QR client.
///
/// # Example
///
/// ```rust,no_run
/// use nbs_ips_qr::{FormValues, FieldId, OptionalFields, Payload, QrClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = QrClient::builder().timeout_secs(10).build()?;
///
///     let values = FormValues::new()
///         .with(FieldId::K, "PR")
///         .with(FieldId::V, "01")
///         .with(FieldId::C, "1")
///         .with(FieldId::R, "845000000040484987")
///         .with(FieldId::N, "JP EPS BEOGRAD")
///         .with(FieldId::I, "RSD3596,13")
///         .with(FieldId::SF, "189");
///     let payload = Payload::from_values(&values, OptionalFields::Omit);
///
///     let image = client.generate().create(&payload).await?;
///     println!("{}", image.to_data_url());
///     Ok(())
/// }
/// ```
pub struct QrClient {
    config: QrConfig,
    generate_service: Arc<GenerateService>,
}

impl QrClient {
    /// Creates a new client builder.
    pub fn builder() -> QrClientBuilder {
        QrClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `NBS_QR_BASE_URL` and `NBS_QR_TIMEOUT`.
    pub fn from_env() -> QrResult<Self> {
        let config = QrConfig::from_env()?;
        QrClientBuilder::from_config(config).build()
    }

    /// Returns the generate service.
    pub fn generate(&self) -> &GenerateService {
        &self.generate_service
    }

    /// Returns a submit controller sharing this client's transport.
    pub fn controller(&self) -> SubmitController {
        SubmitController::new(
            Arc::clone(&self.generate_service),
            self.config.optional_fields,
        )
    }

    /// Returns the configuration.
    pub fn config(&self) -> &QrConfig {
        &self.config
    }
}

impl std::fmt::Debug for QrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the QR client.
pub struct QrClientBuilder {
    config_builder: QrConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl QrClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: QrConfigBuilder::new(),
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: QrConfig) -> Self {
        let mut config_builder = QrConfigBuilder::new()
            .base_url(config.base_url)
            .optional_fields(config.optional_fields);
        if let Some(timeout) = config.timeout {
            config_builder = config_builder.timeout(timeout);
        }

        Self {
            config_builder,
            transport: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the optional-field policy.
    pub fn optional_fields(mut self, policy: OptionalFields) -> Self {
        self.config_builder = self.config_builder.optional_fields(policy);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> QrResult<QrClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout)
                    .map_err(|e| QrError::configuration(e.to_string()))?,
            ),
        };

        let generate_service = Arc::new(GenerateService::new(transport));

        Ok(QrClient {
            config,
            generate_service,
        })
    }
}

impl Default for QrClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockTransport;

    #[test]
    fn test_builder_defaults() {
        let client = QrClient::builder().build().unwrap();

        assert_eq!(client.config(), &QrConfig::default());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = QrClient::builder().base_url("::::").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_round_trip() {
        let config = QrConfig::builder()
            .base_url("http://localhost:9000")
            .timeout_secs(3)
            .optional_fields(OptionalFields::IncludeEmpty)
            .build()
            .unwrap();

        let client = QrClientBuilder::from_config(config.clone())
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();

        assert_eq!(client.config(), &config);
    }

    #[test]
    fn test_debug_output() {
        let client = QrClient::builder()
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();

        assert!(format!("{:?}", client).contains("nbs.rs"));
    }
}
