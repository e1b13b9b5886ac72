//! Contract tests for `EmbeddingsClient` against a simulated embeddings
//! service. Request/response shapes follow the OpenAI-compatible
//! `/v1/embeddings` endpoint.

use regap_model::{Embedder, ModelClients, ModelConfig, ModelError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_clients(server: &MockServer) -> ModelClients {
    let config = ModelConfig {
        embeddings_url: server.uri().parse().unwrap(),
        completion_url: "http://127.0.0.1:19001".parse().unwrap(),
        api_key: "test-token".into(),
        embedding_model: "test-embed".into(),
        completion_model: "test-complete".into(),
        timeout_secs: 5,
    };
    ModelClients::new(config).unwrap()
}

#[tokio::test]
async fn embed_query_sends_model_and_input_and_returns_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-embed",
            "input": ["Board must approve risk appetite annually."],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"embedding": [0.1, 0.2, 0.3]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let vector = clients
        .embeddings()
        .embed_query("Board must approve risk appetite annually.")
        .await
        .unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn embed_documents_preserves_input_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"embedding": [1.0, 0.0]},
                {"embedding": [0.0, 1.0]}
            ]
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let vectors = clients
        .embeddings()
        .embed_documents(&["first".to_string(), "second".to_string()])
        .await
        .unwrap();
    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn embed_documents_empty_batch_makes_no_request() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and fail the call.
    let clients = test_clients(&server).await;
    let vectors = clients.embeddings().embed_documents(&[]).await.unwrap();
    assert!(vectors.is_empty());
}

#[tokio::test]
async fn count_mismatch_is_an_unexpected_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"embedding": [1.0]}]
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let err = clients
        .embeddings()
        .embed_documents(&["a".to_string(), "b".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::UnexpectedShape { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn rate_limit_classified_transient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let clients = test_clients(&server).await;
    let err = clients.embeddings().embed_query("text").await.unwrap_err();
    match &err {
        ModelError::Api { status, .. } => assert_eq!(*status, 429),
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_transient());
}
