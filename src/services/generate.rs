//! QR generation service.

use std::sync::Arc;
use tracing::instrument;

use crate::config::GENERATE_PATH;
use crate::errors::{QrError, QrResult};
use crate::image::QrImage;
use crate::observability::mask_account;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{FieldId, Payload};

/// Service for the `gen` endpoint.
///
/// Sends exactly one request per call. No retries.
pub struct GenerateService {
    transport: Arc<dyn HttpTransport>,
}

impl GenerateService {
    /// Creates a new generate service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Posts `payload` and returns the generated image.
    #[instrument(
        skip(self, payload),
        fields(
            keys = payload.len(),
            account = %mask_account(payload.get(FieldId::R).unwrap_or_default())
        )
    )]
    pub async fn create(&self, payload: &Payload) -> QrResult<QrImage> {
        let http_request = self.build_request(payload)?;

        let response = self.transport.send(http_request).await?;

        self.parse_response(response)
    }

    /// Builds an HTTP request.
    fn build_request(&self, payload: &Payload) -> QrResult<HttpRequest> {
        let body = payload.to_json()?;

        Ok(HttpRequest::post(GENERATE_PATH)
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Parses the HTTP response.
    fn parse_response(&self, response: HttpResponse) -> QrResult<QrImage> {
        if !response.is_success() {
            return Err(QrError::http(response.status, &response.body));
        }

        let content_type = response.header("content-type").map(str::to_owned);
        let image = QrImage::new(response.body, content_type.as_deref());

        if !image.is_image() {
            tracing::warn!(mime = %image.mime(), "QR API returned a non-image body");
        }

        Ok(image)
    }
}

impl std::fmt::Debug for GenerateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport};
    use crate::transport::TransportError;
    use crate::types::{FormValues, OptionalFields};

    fn payload() -> Payload {
        let values = FormValues::new()
            .with(FieldId::K, "PR")
            .with(FieldId::V, "01")
            .with(FieldId::C, "1")
            .with(FieldId::R, "845000000040484987")
            .with(FieldId::N, "JP EPS BEOGRAD")
            .with(FieldId::I, "RSD3596,13")
            .with(FieldId::SF, "189");
        Payload::from_values(&values, OptionalFields::Omit)
    }

    #[tokio::test]
    async fn test_create_posts_json() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::image(b"png-bytes".to_vec(), "image/png"));
        let service = GenerateService::new(transport.clone());

        let image = service.create(&payload()).await.unwrap();

        assert_eq!(image.data(), b"png-bytes");
        assert_eq!(image.mime().essence_str(), "image/png");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.path, "gen");
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body["R"], "845000000040484987");
        assert!(body.get("RO").is_none());
    }

    #[tokio::test]
    async fn test_create_maps_status_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::status(400, b"{\"s\":{\"code\":1}}".to_vec()));
        let service = GenerateService::new(transport);

        let error = service.create(&payload()).await.unwrap_err();

        assert_eq!(error.status(), Some(400));
    }

    #[tokio::test]
    async fn test_create_maps_transport_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_failure(TransportError::Connection {
            message: "connection refused".to_string(),
        });
        let service = GenerateService::new(transport);

        let error = service.create(&payload()).await.unwrap_err();

        assert!(error.is_transport());
    }
}
