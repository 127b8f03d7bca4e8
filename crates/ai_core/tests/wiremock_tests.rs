//! Integration tests for the chat-completion engine using WireMock
//!
//! These tests mock an OpenAI-compatible HTTP API to verify client behavior
//! without contacting a real provider.

use std::time::Duration;

use ai_core::{
    ChatCompletionEngine, ChatMessage, ChatRequest, GenerationEngine, GenerationError,
    MAX_RESPONSE_BYTES, ProviderConfig,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        base_url: format!("{base_url}/v1"),
        model: "test-model".to_string(),
        timeout_ms: 500,
        temperature: 0.7,
        max_tokens: 256,
        ..ProviderConfig::default()
    }
    .with_api_key("sk-test")
}

fn request() -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system("You write emails"),
            ChatMessage::user("Write a short email"),
        ],
    }
}

fn completion_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "test-model-0613",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "max_tokens": 256,
            "messages": [
                {"role": "system", "content": "You write emails"},
                {"role": "user", "content": "Write a short email"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_response("Subject: Hi\nHello there")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let completion = engine.complete(&request()).await.unwrap();

    assert_eq!(completion.content, "Subject: Hi\nHello there");
    assert_eq!(completion.model, "test-model-0613");
}

#[tokio::test]
async fn falls_back_to_configured_model_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let completion = engine.complete(&request()).await.unwrap();

    assert_eq!(completion.model, "test-model");
}

// =============================================================================
// Failure Classification
// =============================================================================

#[tokio::test]
async fn client_error_is_permanent_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Invalid API key", "type": "auth_error"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert_eq!(
        err,
        GenerationError::Provider {
            status: 401,
            message: "Invalid API key (type=auth_error)".to_string()
        }
    );
    assert!(!err.is_transient());
}

#[tokio::test]
async fn server_error_is_transient() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert!(matches!(err, GenerationError::Provider { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn slow_provider_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_response("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert_eq!(err, GenerationError::Timeout(500));
}

#[tokio::test]
async fn malformed_success_payload_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn non_json_success_payload_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Reserve a port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let engine = ChatCompletionEngine::new(config_for_mock(&uri)).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert!(matches!(err, GenerationError::Transport(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn missing_credential_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("x")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ProviderConfig {
        api_key: None,
        ..config_for_mock(&mock_server.uri())
    };
    let engine = ChatCompletionEngine::new(config).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    assert_eq!(err, GenerationError::MissingCredential);
}

// =============================================================================
// Response Size Limit
// =============================================================================

#[tokio::test]
async fn oversized_success_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(MAX_RESPONSE_BYTES + 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    match err {
        GenerationError::InvalidResponse(reason) => assert!(reason.contains("exceeds")),
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_error_page_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>".repeat(MAX_RESPONSE_BYTES)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let err = engine.complete(&request()).await.unwrap_err();

    match &err {
        GenerationError::Provider { status, message } => {
            assert_eq!(*status, 502);
            assert!(message.contains("exceeds"));
            assert!(message.len() < 100);
        },
        other => panic!("expected Provider, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn large_body_under_limit_is_read() {
    let mock_server = MockServer::start().await;

    let content = "a".repeat(MAX_RESPONSE_BYTES / 2);
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response(&content)))
        .mount(&mock_server)
        .await;

    let engine = ChatCompletionEngine::new(config_for_mock(&mock_server.uri())).unwrap();
    let completion = engine.complete(&request()).await.unwrap();

    assert_eq!(completion.content.len(), MAX_RESPONSE_BYTES / 2);
}
