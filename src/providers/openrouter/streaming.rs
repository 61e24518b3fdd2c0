//! OpenRouter stream parsing
//!
//! The body is read line by line with [`SseLineParser`](crate::utils::SseLineParser):
//! undecodable lines are skipped rather than failing the stream, and
//! `data: [DONE]` ends it. Comment lines (`: OPENROUTER PROCESSING`) are
//! keep-alives and produce nothing.

use futures::Stream;
use serde_json::Value;

use crate::error::LlmError;
use crate::normalizer::ReasoningMode;
use crate::providers::openai_compatible::extract_deltas;
use crate::stream::ChatStream;
use crate::types::RawDelta;
use crate::utils::streaming::StreamFactory;

pub const PROVIDER_ID: &str = "openrouter";

/// Chunk → raw deltas. `delta.reasoning` is native reasoning; `delta.content`
/// may still carry inline `<think>` markup for the normalizer.
pub fn extract_chunk(chunk: Value) -> Result<Vec<RawDelta>, LlmError> {
    extract_deltas(PROVIDER_ID, chunk)
}

/// Normalize an already-open OpenRouter response body.
pub fn normalize_body<S, B, E>(byte_stream: S) -> ChatStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    StreamFactory::from_line_bytes(
        PROVIDER_ID,
        byte_stream,
        extract_chunk,
        ReasoningMode::inline_think(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatStreamEvent;
    use futures::{StreamExt, stream};

    fn body(chunks: &[&str]) -> Vec<Result<Vec<u8>, std::io::Error>> {
        chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect()
    }

    async fn collect(chunks: &[&str]) -> Vec<Result<ChatStreamEvent, LlmError>> {
        normalize_body(stream::iter(body(chunks))).collect().await
    }

    #[tokio::test]
    async fn test_inline_think_tags() {
        let events = collect(&[
            ": OPENROUTER PROCESSING\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"<think>Let me\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\" reason\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"</think>\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;
        let events: Vec<_> = events.into_iter().map(|e| e.unwrap()).collect();
        assert_eq!(
            events,
            vec![
                ChatStreamEvent::reasoning("<think>Let me"),
                ChatStreamEvent::reasoning(" reason"),
                ChatStreamEvent::reasoning("</think>"),
                ChatStreamEvent::content("Hello"),
            ]
        );
    }

    #[tokio::test]
    async fn test_native_reasoning_field_and_malformed_line() {
        let events = collect(&[
            "data: {\"choices\":[{\"delta\":{\"reasoning\":\"hmm\",\"content\":\"\"}}]}\n",
            "data: {broken\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n",
            "data: [DONE]\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
        ])
        .await;
        let events: Vec<_> = events.into_iter().map(|e| e.unwrap()).collect();
        assert_eq!(
            events,
            vec![
                ChatStreamEvent::reasoning("hmm"),
                ChatStreamEvent::content("Hi"),
            ]
        );
    }

    #[tokio::test]
    async fn test_error_chunk_ends_stream() {
        let events = collect(&[
            "data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n",
            "data: {\"error\":{\"message\":\"upstream timeout\",\"code\":502}}\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"never\"}}]}\n",
        ])
        .await;
        assert_eq!(events.len(), 2);
        let err = events[1].as_ref().unwrap_err();
        assert_eq!(err.provider_id(), Some("openrouter"));
        assert_eq!(err.status_code(), Some(502));
    }
}
