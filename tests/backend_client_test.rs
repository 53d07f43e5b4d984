//! Integration tests for the generation backend client with a mocked
//! HTTP server.

use commitgen::GenerationClient;
use commitgen::error::GenerationError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointing at a mock server.
fn mock_client(server: &MockServer) -> GenerationClient {
    GenerationClient::with_url(server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn success_returns_the_generated_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "plainText": "diff --git a/x b/x\n+hello\n",
            "isPair": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aiResponse": "fix: add hello"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = mock_client(&server)
        .generate("diff --git a/x b/x\n+hello\n")
        .await
        .expect("generation should succeed");

    assert_eq!(message, "fix: add hello");
}

#[tokio::test]
async fn failure_status_carries_status_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .generate("+change\n")
        .await
        .expect_err("500 should fail");

    match &err {
        GenerationError::Backend { status, body, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "oops");
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
    let text = err.to_string();
    assert!(text.contains("500"));
    assert!(text.contains("oops"));
}

#[tokio::test]
async fn success_body_without_expected_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "done"})))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .generate("+change\n")
        .await
        .expect_err("missing aiResponse should fail");

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .generate("+change\n")
        .await
        .expect_err("non-JSON body should fail");

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    // Port 1 is reserved and should refuse connections.
    let client =
        GenerationClient::with_url("http://127.0.0.1:1/".to_string()).expect("client builds");

    let err = client
        .generate("+change\n")
        .await
        .expect_err("connection should fail");

    match err {
        GenerationError::Network(message) => assert!(!message.is_empty()),
        other => panic!("expected Network error, got {other:?}"),
    }
}
