//! Line-oriented `data:` event-stream parser
//!
//! The aggregator route is parsed here rather than through a generic SSE
//! decoder because its rules are looser:
//!
//! ```text
//! data: {"choices":[...]}
//!
//! : OPENROUTER PROCESSING
//! data: [DONE]
//! ```
//!
//! - each `data: ` line carries one JSON chunk or the `[DONE]` sentinel
//! - blank lines and anything not starting with `data:` are ignored
//! - a `data:` line with malformed JSON is skipped, not fatal

use crate::error::LlmError;
use futures::{Stream, StreamExt};

/// One meaningful line of the event stream
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    Data(serde_json::Value),
    Done,
}

/// Incremental parser fed with raw network chunks.
///
/// Bytes are buffered until a newline arrives, so lines and multi-byte
/// characters split across chunks are reassembled.
#[derive(Debug, Default)]
pub struct SseLineParser {
    buffer: Vec<u8>,
}

impl SseLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every complete line it finished.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseLine> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            if let Some(line) = parse_line(&self.buffer[start..end]) {
                lines.push(line);
            }
            start = end + 1;
        }
        self.buffer.drain(..start);
        lines
    }

    /// Parse whatever is left once the body has ended (a last line without
    /// a trailing newline).
    pub fn finish(&mut self) -> Option<SseLine> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }
}

fn parse_line(raw: &[u8]) -> Option<SseLine> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches('\r');

    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    if payload == "[DONE]" {
        return Some(SseLine::Done);
    }

    match serde_json::from_str(payload) {
        Ok(value) => Some(SseLine::Data(value)),
        Err(e) => {
            tracing::debug!(error = %e, line = payload, "skipping malformed data line");
            None
        }
    }
}

/// Parse a complete payload, stopping at `[DONE]`.
pub fn parse_event_stream(payload: &str) -> Vec<serde_json::Value> {
    let mut parser = SseLineParser::new();
    let mut lines = parser.feed(payload.as_bytes());
    lines.extend(parser.finish());

    lines
        .into_iter()
        .map_while(|line| match line {
            SseLine::Data(value) => Some(value),
            SseLine::Done => None,
        })
        .collect()
}

/// Turn a response body into parsed JSON chunks.
///
/// The stream ends at the first `[DONE]` line or when the body ends; either
/// way the body stream is dropped. Transport errors end it with
/// [`LlmError::Stream`].
pub fn data_stream<S, B, E>(
    provider: &'static str,
    byte_stream: S,
) -> impl Stream<Item = Result<serde_json::Value, LlmError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut parser = SseLineParser::new();
        let mut body = Box::pin(byte_stream);

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(LlmError::stream(provider, format!("Stream error: {e}")));
                    return;
                }
            };
            for line in parser.feed(chunk.as_ref()) {
                match line {
                    SseLine::Data(value) => yield Ok(value),
                    SseLine::Done => return,
                }
            }
        }

        if let Some(SseLine::Data(value)) = parser.finish() {
            yield Ok(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use serde_json::json;

    #[test]
    fn test_single_chunk_then_done() {
        let values = parse_event_stream("data: {\"text\":\"a\"}\n\ndata: [DONE]\n");
        assert_eq!(values, vec![json!({"text": "a"})]);
    }

    #[test]
    fn test_nothing_after_done() {
        let values = parse_event_stream("data: {\"n\":1}\ndata: [DONE]\ndata: {\"n\":2}\n");
        assert_eq!(values, vec![json!({"n": 1})]);
    }

    #[test]
    fn test_ignores_comments_blank_and_other_fields() {
        let payload = ": OPENROUTER PROCESSING\n\nevent: message\nid: 7\ndata: {\"n\":1}\n\n";
        assert_eq!(parse_event_stream(payload), vec![json!({"n": 1})]);
    }

    #[test]
    fn test_skips_malformed_json() {
        let payload = "data: {not json\ndata: {\"n\":2}\n";
        assert_eq!(parse_event_stream(payload), vec![json!({"n": 2})]);
    }

    #[test]
    fn test_crlf_and_missing_space() {
        let payload = "data:{\"n\":1}\r\n\r\ndata: [DONE]\r\n";
        assert_eq!(parse_event_stream(payload), vec![json!({"n": 1})]);
    }

    #[test]
    fn test_line_split_across_feeds() {
        let mut parser = SseLineParser::new();
        assert!(parser.feed(b"data: {\"te").is_empty());
        assert!(parser.feed(b"xt\":\"h").is_empty());
        let lines = parser.feed(b"i\"}\n");
        assert_eq!(lines, vec![SseLine::Data(json!({"text": "hi"}))]);
    }

    #[test]
    fn test_multibyte_char_split_across_feeds() {
        let bytes = "data: {\"text\":\"é\"}\n".as_bytes();
        // split inside the two-byte 'é'
        let split = bytes.iter().position(|b| *b == 0xC3).unwrap() + 1;
        let mut parser = SseLineParser::new();
        assert!(parser.feed(&bytes[..split]).is_empty());
        let lines = parser.feed(&bytes[split..]);
        assert_eq!(lines, vec![SseLine::Data(json!({"text": "é"}))]);
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(parse_event_stream("data: {\"n\":1}"), vec![json!({"n": 1})]);
    }

    #[tokio::test]
    async fn test_data_stream_terminates_at_done() {
        let chunks: Vec<Result<&[u8], std::io::Error>> = vec![
            Ok(&b"data: {\"text\":\"a\"}\n\nda"[..]),
            Ok(&b"ta: [DONE]\n"[..]),
            Ok(&b"data: {\"text\":\"b\"}\n"[..]),
        ];
        let values: Vec<_> = data_stream("test", stream::iter(chunks))
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(values, vec![json!({"text": "a"})]);
    }

    #[tokio::test]
    async fn test_data_stream_transport_error() {
        let chunks: Vec<Result<&[u8], String>> =
            vec![Ok(&b"data: {\"n\":1}\n"[..]), Err("connection reset".to_string())];
        let items: Vec<_> = data_stream("test", stream::iter(chunks)).collect().await;
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[1], Err(e) if e.is_stream_error()));
    }
}
