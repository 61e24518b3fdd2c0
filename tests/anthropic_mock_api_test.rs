#![cfg(feature = "anthropic")]
//! Mock API tests for the Anthropic client

use chatmux::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support/stream_fixture.rs"]
mod support;

fn client(server: &MockServer) -> AnthropicClient {
    AnthropicClient::new("test-api-key").with_base_url(server.uri())
}

#[tokio::test]
async fn test_anthropic_streaming_with_thinking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-api-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(support::sse_response(support::load_fixture(
            "anthropic/thinking_and_text.sse",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(messages![user!("What is 6 x 7?")])
        .with_system("Be exact.")
        .with_max_tokens(8000);
    let stream = client(&server)
        .chat_stream(request, ModelVariant(-1))
        .await
        .expect("stream opens");
    let out = support::collect(stream).await;

    assert_eq!(out.reasoning, "Reasoning about the question.");
    assert_eq!(out.content, "Answer: 42");

    let body = support::received_json(&server, "/v1/messages").await;
    assert_eq!(body["model"], "claude-sonnet-4-0");
    assert_eq!(body["stream"], true);
    assert_eq!(body["system"], json!([{"type": "text", "text": "Be exact."}]));
    assert_eq!(body["thinking"], json!({"type": "enabled", "budget_tokens": 4000}));
    assert_eq!(body["max_tokens"], 8000);
    assert_eq!(body["temperature"], 1.0);
}

#[tokio::test]
async fn test_anthropic_unauthorized_fails_before_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .chat_stream(ChatRequest::new(messages![user!("hi")]), ModelVariant(1))
        .await;
    let Err(error) = result else {
        panic!("expected an error before any stream");
    };
    assert!(error.is_provider_error());
    assert_eq!(error.provider_id(), Some("anthropic"));
    assert_eq!(error.status_code(), Some(401));
    assert!(error.to_string().contains("invalid x-api-key"));
}

#[tokio::test]
async fn test_anthropic_fetches_images_before_text() {
    let server = MockServer::start().await;
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    Mock::given(method("GET"))
        .and(path("/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(support::sse_response(
            "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"A cat.\"}}\n\n",
        ))
        .mount(&server)
        .await;

    let image_url = format!("{}/cat.png", server.uri());
    let request = ChatRequest::new(vec![
        ChatMessage::user("What is this?").with_image(ImageInput::new("", image_url)),
    ]);
    let stream = client(&server)
        .chat_stream(request, ModelVariant(2))
        .await
        .expect("stream opens");
    assert_eq!(support::collect(stream).await.content, "A cat.");

    let body = support::received_json(&server, "/v1/messages").await;
    assert_eq!(body["model"], "claude-3-7-sonnet-latest");
    let content = body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["type"], "image");
    assert_eq!(content[0]["source"]["media_type"], "image/png");
    assert_eq!(content[0]["source"]["data"], "iVBORw0KGgoAAAAN");
    assert_eq!(content[1], json!({"type": "text", "text": "What is this?"}));
}

#[tokio::test]
async fn test_anthropic_broken_image_aborts_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(support::sse_response(""))
        .expect(0)
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![ChatMessage::user("?").with_image(ImageInput::new(
        "image/png",
        format!("{}/missing.png", server.uri()),
    ))]);
    let Err(error) = client(&server).chat_stream(request, ModelVariant(1)).await else {
        panic!("image failure must abort the call");
    };
    assert_eq!(error.provider_id(), Some("anthropic"));
    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn test_anthropic_empty_history_with_system_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(support::sse_response("event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n"))
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![]).with_system("You are terse.");
    let stream = client(&server)
        .chat_stream(request, ModelVariant(1))
        .await
        .expect("vendor decides acceptability");
    assert!(support::collect(stream).await.events.is_empty());

    let body = support::received_json(&server, "/v1/messages").await;
    assert_eq!(body["messages"], json!([]));
}
