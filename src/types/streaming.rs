//! Streaming event types for real-time responses

use serde::{Deserialize, Serialize};

/// Canonical streaming event, identical for every provider.
///
/// Serializes to the consumer-facing wire shape:
///
/// ```json
/// {"type":"content_block_delta","delta":{"text":"Hello"}}
/// {"type":"reasoning_content","reasoning_content":"Let me think"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireEvent", from = "WireEvent")]
pub enum ChatStreamEvent {
    /// Visible answer fragment
    ContentDelta { text: String },
    /// Internal reasoning fragment, kept apart from the answer channel
    ReasoningDelta { text: String },
}

impl ChatStreamEvent {
    pub fn content(text: impl Into<String>) -> Self {
        Self::ContentDelta { text: text.into() }
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::ReasoningDelta { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::ContentDelta { text } | Self::ReasoningDelta { text } => text,
        }
    }

    pub fn is_reasoning(&self) -> bool {
        matches!(self, Self::ReasoningDelta { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct WireText {
    text: String,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum WireEvent {
    #[serde(rename = "content_block_delta")]
    Content { delta: WireText },
    #[serde(rename = "reasoning_content")]
    Reasoning { reasoning_content: String },
}

impl From<ChatStreamEvent> for WireEvent {
    fn from(event: ChatStreamEvent) -> Self {
        match event {
            ChatStreamEvent::ContentDelta { text } => WireEvent::Content {
                delta: WireText { text },
            },
            ChatStreamEvent::ReasoningDelta { text } => WireEvent::Reasoning {
                reasoning_content: text,
            },
        }
    }
}

impl From<WireEvent> for ChatStreamEvent {
    fn from(event: WireEvent) -> Self {
        match event {
            WireEvent::Content { delta } => ChatStreamEvent::ContentDelta { text: delta.text },
            WireEvent::Reasoning { reasoning_content } => ChatStreamEvent::ReasoningDelta {
                text: reasoning_content,
            },
        }
    }
}

/// Provider chunk reduced to its two text channels.
///
/// Every vendor parser produces this shape; the normalizer turns it into
/// [`ChatStreamEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDelta {
    pub content: Option<String>,
    pub reasoning: Option<String>,
}

impl RawDelta {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            reasoning: None,
        }
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        Self {
            content: None,
            reasoning: Some(text.into()),
        }
    }

    /// Neither channel carries text.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty)
            && self.reasoning.as_deref().is_none_or(str::is_empty)
    }
}
