//! Test fixtures utilities: load SSE bodies, serve them from a mock server,
//! and fold normalized streams back into text.

#![allow(dead_code)]

use chatmux::{ChatStream, ChatStreamEvent, LlmError};
use futures_util::StreamExt;
use std::io;
use wiremock::ResponseTemplate;

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture_path(relative: &str) -> String {
    format!("{}/tests/fixtures/{relative}", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(relative: &str) -> String {
    std::fs::read_to_string(fixture_path(relative)).expect("fixture exists")
}

/// Split an `.sse` fixture into one byte chunk per event (blank-line separated).
pub fn load_sse_fixture_as_bytes(relative: &str) -> Vec<Result<Vec<u8>, io::Error>> {
    let normalized = load_fixture(relative).replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|chunk| chunk.trim_end_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| Ok(format!("{chunk}\n\n").into_bytes()))
        .collect()
}

/// 200 response streaming `body` as server-sent events.
pub fn sse_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into().into_bytes(), "text/event-stream")
}

/// Everything a stream produced, split by channel.
#[derive(Debug, Default)]
pub struct Collected {
    pub events: Vec<ChatStreamEvent>,
    pub content: String,
    pub reasoning: String,
    pub error: Option<LlmError>,
}

pub async fn collect(mut stream: ChatStream) -> Collected {
    let mut out = Collected::default();
    while let Some(item) = stream.next().await {
        match item {
            Ok(event) => {
                match &event {
                    ChatStreamEvent::ContentDelta { text } => out.content.push_str(text),
                    ChatStreamEvent::ReasoningDelta { text } => out.reasoning.push_str(text),
                }
                out.events.push(event);
            }
            Err(e) => {
                assert!(out.error.is_none(), "stream yielded a second error");
                out.error = Some(e);
            }
        }
    }
    out
}

/// JSON body of the single request received on `path`.
pub async fn received_json(server: &wiremock::MockServer, path: &str) -> serde_json::Value {
    let requests = server.received_requests().await.expect("recording enabled");
    let request = requests
        .iter()
        .find(|r| r.url.path() == path)
        .expect("request received");
    serde_json::from_slice(&request.body).expect("json body")
}
