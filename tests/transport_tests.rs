//! Integration tests using WireMock
//!
//! Exercise the reqwest transport end to end: payload serialization, headers,
//! status mapping and image decoding.

use nbs_ips_qr::controller::SUBMIT_FAILURE_MESSAGE;
use nbs_ips_qr::{ErrorAnchor, FieldId, MemoryForm, QrClient, QrError, SubmitOutcome};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn client_for(server: &MockServer) -> QrClient {
    QrClient::builder()
        .base_url(format!("{}/QRcode/api/qr/v1", server.uri()))
        .build()
        .expect("Failed to build client")
}

fn valid_form() -> MemoryForm {
    MemoryForm::new()
        .with_value(FieldId::K, "PR")
        .with_value(FieldId::V, "01")
        .with_value(FieldId::C, "1")
        .with_value(FieldId::R, "845000000040484987")
        .with_value(FieldId::N, "JP EPS BEOGRAD")
        .with_value(FieldId::I, "RSD3596,13")
        .with_value(FieldId::SF, "189")
        .with_value(FieldId::RO, "97163220000111111111000")
}

#[tokio::test]
async fn test_generate_integration_success() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/QRcode/api/qr/v1/gen"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "K": "PR",
            "V": "01",
            "C": "1",
            "R": "845000000040484987",
            "N": "JP EPS BEOGRAD",
            "I": "RSD3596,13",
            "SF": "189",
            "RO": "97163220000111111111000"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"fake-image-data".to_vec()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_form();

    let outcome = client.controller().submit(&mut form).await;

    assert!(outcome.is_rendered(), "unexpected outcome: {:?}", outcome);
    assert_eq!(
        form.image_source(),
        Some("data:image/png;base64,ZmFrZS1pbWFnZS1kYXRh")
    );
}

#[tokio::test]
async fn test_generate_integration_server_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/QRcode/api/qr/v1/gen"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_form();

    let outcome = client.controller().submit(&mut form).await;

    match outcome {
        SubmitOutcome::Failed(QrError::Http { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body.as_deref(), Some("internal"));
        }
        other => panic!("Expected Http failure, got {:?}", other),
    }
    assert_eq!(
        form.annotations_for(ErrorAnchor::Submit),
        vec![SUBMIT_FAILURE_MESSAGE]
    );
    assert!(!form.is_image_visible());
}

#[tokio::test]
async fn test_blocked_submission_never_reaches_server() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_form().with_value(FieldId::I, "RSD3596.13");

    let outcome = client.controller().submit(&mut form).await;

    assert!(outcome.is_blocked());
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = QrClient::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .expect("Failed to build client");
    let mut form = valid_form();

    let outcome = client.controller().submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_transport()));
    assert_eq!(form.annotations().len(), 1);
}
