//! Contract tests for `CompletionClient` against a simulated
//! text-generation service speaking the `/v1/messages` shape.

use regap_model::{CompletionModel, ModelClients, ModelConfig, ModelError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_clients(server: &MockServer) -> ModelClients {
    let config = ModelConfig {
        embeddings_url: "http://127.0.0.1:19000".parse().unwrap(),
        completion_url: server.uri().parse().unwrap(),
        api_key: "test-token".into(),
        embedding_model: "test-embed".into(),
        completion_model: "test-complete".into(),
        timeout_secs: 5,
    };
    ModelClients::new(config).unwrap()
}

#[tokio::test]
async fn complete_sends_prompt_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-complete",
            "max_tokens": 3000,
            "messages": [{"role": "user", "content": "analyze this"}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "Req | Yes | 3. Governance | Fine."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let text = clients
        .completion()
        .complete("analyze this", 0.2, 3000)
        .await
        .unwrap();
    assert_eq!(text, "Req | Yes | 3. Governance | Fine.");
}

#[tokio::test]
async fn multiple_text_blocks_are_concatenated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                {"type": "text", "text": "first half "},
                {"type": "text", "text": "second half"}
            ]
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let text = clients.completion().complete("p", 0.1, 100).await.unwrap();
    assert_eq!(text, "first half second half");
}

#[tokio::test]
async fn validation_error_is_permanent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error":"prompt too long"}"#),
        )
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let err = clients.completion().complete("p", 0.1, 100).await.unwrap_err();
    assert!(matches!(err, ModelError::Api { status: 400, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn server_fault_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let err = clients.completion().complete("p", 0.1, 100).await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn empty_content_is_an_unexpected_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": []
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let err = clients.completion().complete("p", 0.1, 100).await.unwrap_err();
    assert!(matches!(err, ModelError::UnexpectedShape { .. }));
}
