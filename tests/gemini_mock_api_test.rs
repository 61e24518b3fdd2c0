#![cfg(feature = "google")]
//! Mock API tests for the Gemini client

use chatmux::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support/stream_fixture.rs"]
mod support;

const STREAM_PATH: &str = "/v1beta/models/gemini-2.5-pro:streamGenerateContent";

#[tokio::test]
async fn test_gemini_streaming_with_thoughts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "g-key"))
        .respond_with(support::sse_response(support::load_fixture(
            "gemini/thought_and_text.sse",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(messages![user!("Which is faster?")])
        .with_system(vec![SystemBlock::new("Compare."), SystemBlock::new("Be brief.")]);
    let stream = GeminiClient::new("g-key")
        .with_base_url(server.uri())
        .chat_stream(request, ModelVariant(-2))
        .await
        .expect("stream opens");
    let out = support::collect(stream).await;

    assert_eq!(out.reasoning, "**Weighing options** I should compare both.");
    assert_eq!(out.content, "The second one is faster.");

    let body = support::received_json(&server, STREAM_PATH).await;
    assert_eq!(
        body["systemInstruction"],
        json!({"parts": [{"text": "Compare.\n\nBe brief."}]})
    );
    assert_eq!(body["generationConfig"]["thinkingConfig"]["includeThoughts"], true);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
}

#[tokio::test]
async fn test_gemini_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let result = GeminiClient::new("g-key")
        .with_base_url(server.uri())
        .chat_stream(ChatRequest::new(messages![user!("hi")]), ModelVariant(1))
        .await;
    let Err(error) = result else {
        panic!("expected an error before any stream");
    };
    assert_eq!(error.provider_id(), Some("gemini"));
    assert_eq!(error.status_code(), Some(429));
}

#[tokio::test]
async fn test_gemini_local_image_is_inlined() {
    use std::io::Write;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(support::sse_response(
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"A dot.\"}],\"role\":\"model\"}}]}\n\n",
        ))
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
    file.write_all(b"GIF89a").unwrap();
    let request = ChatRequest::new(vec![ChatMessage::user("Describe").with_image(
        ImageInput::new("image/gif", file.path().to_string_lossy().to_string()),
    )]);

    let stream = GeminiClient::new("g-key")
        .with_base_url(server.uri())
        .chat_stream(request, ModelVariant(0))
        .await
        .expect("stream opens");
    assert_eq!(support::collect(stream).await.content, "A dot.");

    let body = support::received_json(
        &server,
        "/v1beta/models/gemini-2.5-flash:streamGenerateContent",
    )
    .await;
    assert_eq!(
        body["contents"][0]["parts"],
        json!([
            {"inlineData": {"mimeType": "image/gif", "data": "R0lGODlh"}},
            {"text": "Describe"},
        ])
    );
}
