//! Integration tests for the chat-completion client using WireMock
//!
//! These tests mock the OpenAI HTTP API to verify client behavior without
//! contacting the real service.

use std::time::Duration;

use ai_core::{FablePrompt, GenerationConfig, GenerationError, OpenAiFableClient, TextGenerator};
use domain::StyleMode;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(base_url: &str) -> GenerationConfig {
    GenerationConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
        ..Default::default()
    }
    .with_api_key("sk-test")
}

fn lion_mouse_prompt() -> FablePrompt {
    FablePrompt::from_parts("Lion", "Mouse", "Jungle", "Be kind", StyleMode::Default)
}

fn completion_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

// =============================================================================
// Success Paths
// =============================================================================

#[tokio::test]
async fn generate_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 400
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response(
            "Once a lion spared a mouse.\n\nMoral: Be kind",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    let fable = client.generate(&lion_mouse_prompt()).await.unwrap();

    assert_eq!(fable, "Once a lion spared a mouse.\n\nMoral: Be kind");
}

#[tokio::test]
async fn request_carries_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("ok")))
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    client.generate(&lion_mouse_prompt()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("You are a creative storyteller")
    );
    assert_eq!(body["messages"][1]["role"], "user");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("- Characters: Lion and Mouse"));
    assert!(user.ends_with("End with \"Moral: Be kind\""));
    assert!((body["temperature"].as_f64().unwrap() - 0.8).abs() < 0.001);
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();

    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        },
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let client = OpenAiFableClient::new(config_for_mock(&server.uri())).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_response("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = GenerationConfig {
        timeout_ms: 100,
        ..config_for_mock(&server.uri())
    };
    let client = OpenAiFableClient::new(config).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Timeout));
}

#[tokio::test]
async fn missing_credentials_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("x")))
        .expect(0)
        .mount(&server)
        .await;

    let config = GenerationConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = OpenAiFableClient::new(config).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredentials));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = OpenAiFableClient::new(config_for_mock("http://127.0.0.1:1")).unwrap();
    let err = client.generate(&lion_mouse_prompt()).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Transport(_) | GenerationError::Timeout
    ));
}
