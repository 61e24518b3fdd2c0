#![cfg(all(feature = "anthropic", feature = "google", feature = "openrouter"))]
//! Recorded vendor streams run through the converters and the normalizer

use chatmux::normalizer::ReasoningMode;
use chatmux::providers::anthropic::AnthropicEventConverter;
use chatmux::providers::gemini::GeminiEventConverter;
use chatmux::providers::openai_compatible::OpenAiCompatibleEventConverter;
use chatmux::providers::openrouter::streaming::normalize_body;
use chatmux::utils::streaming::StreamFactory;
use chatmux::ChatStreamEvent;

#[path = "support/stream_fixture.rs"]
mod support;

#[tokio::test]
async fn anthropic_thinking_and_text_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("anthropic/thinking_and_text.sse");
    let stream = StreamFactory::from_sse_bytes(
        futures_util::stream::iter(bytes),
        AnthropicEventConverter::new(),
        ReasoningMode::NativeField,
    );
    let out = support::collect(stream).await;

    assert!(out.error.is_none());
    assert_eq!(out.reasoning, "Reasoning about the question.");
    assert_eq!(out.content, "Answer: 42");
    // all reasoning precedes all content in this recording
    let first_content = out.events.iter().position(|e| !e.is_reasoning()).unwrap();
    assert!(out.events[first_content..].iter().all(|e| !e.is_reasoning()));
}

#[tokio::test]
async fn anthropic_error_event_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("anthropic/error_event.sse");
    let stream = StreamFactory::from_sse_bytes(
        futures_util::stream::iter(bytes),
        AnthropicEventConverter::new(),
        ReasoningMode::NativeField,
    );
    let out = support::collect(stream).await;

    assert_eq!(out.content, "Partial");
    let error = out.error.expect("error surfaced");
    assert!(error.is_provider_error());
    assert!(error.to_string().contains("Overloaded"));
}

#[tokio::test]
async fn gemini_thought_and_text_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("gemini/thought_and_text.sse");
    let stream = StreamFactory::from_sse_bytes(
        futures_util::stream::iter(bytes),
        GeminiEventConverter::new(),
        ReasoningMode::NativeField,
    );
    let out = support::collect(stream).await;

    assert!(out.error.is_none());
    assert_eq!(out.reasoning, "**Weighing options** I should compare both.");
    assert_eq!(out.content, "The second one is faster.");
}

#[tokio::test]
async fn openai_compatible_reasoning_content_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("openai/reasoning_content.sse");
    let stream = StreamFactory::from_sse_bytes(
        futures_util::stream::iter(bytes),
        OpenAiCompatibleEventConverter::new("xai"),
        ReasoningMode::NativeField,
    );
    let out = support::collect(stream).await;

    assert!(out.error.is_none());
    assert_eq!(
        out.events,
        vec![
            ChatStreamEvent::reasoning("First, add "),
            ChatStreamEvent::reasoning("the numbers."),
            ChatStreamEvent::content("2 + 2 = 4"),
        ]
    );
}

#[tokio::test]
async fn openrouter_inline_think_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("openrouter/inline_think.sse");
    let out = support::collect(normalize_body(futures_util::stream::iter(bytes))).await;

    assert!(out.error.is_none());
    assert_eq!(out.reasoning, "<think>The user wants a greeting.</think>");
    assert_eq!(out.content, "Hello there!");
}

#[tokio::test]
async fn openrouter_fixture_byte_by_byte() {
    // same recording, delivered one byte per network read
    let body = support::load_fixture("openrouter/inline_think.sse");
    let bytes: Vec<Result<Vec<u8>, std::io::Error>> =
        body.bytes().map(|b| Ok(vec![b])).collect();
    let out = support::collect(normalize_body(futures_util::stream::iter(bytes))).await;

    assert_eq!(out.reasoning, "<think>The user wants a greeting.</think>");
    assert_eq!(out.content, "Hello there!");
}

#[tokio::test]
async fn replaying_a_recording_gives_the_same_events() {
    let run = || async {
        let bytes = support::load_sse_fixture_as_bytes("openrouter/inline_think.sse");
        support::collect(normalize_body(futures_util::stream::iter(bytes)))
            .await
            .events
    };
    assert_eq!(run().await, run().await);
}
