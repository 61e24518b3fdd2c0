//! Request body construction for OpenAI-compatible providers

use serde_json::{Value, json};

use crate::types::{ChatMessage, ChatRequest};

/// Convert the system instruction and history into a `messages` array.
///
/// The system instruction (blocks joined with a blank line) becomes a leading
/// `system` message when non-empty. Images are passed by reference: the
/// original URL goes into an `image_url` part after the text part, nothing is
/// fetched.
pub fn convert_messages(request: &ChatRequest) -> Vec<Value> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if !request.system.is_empty() {
        messages.push(json!({
            "role": "system",
            "content": request.system.joined(),
        }));
    }

    messages.extend(request.messages.iter().map(convert_message));
    messages
}

fn convert_message(message: &ChatMessage) -> Value {
    if !message.has_images() {
        return json!({
            "role": message.role.as_str(),
            "content": message.content,
        });
    }

    let mut parts = Vec::with_capacity(message.images.len() + 1);
    if !message.content.is_empty() {
        parts.push(json!({ "type": "text", "text": message.content }));
    }
    for image in &message.images {
        parts.push(json!({
            "type": "image_url",
            "image_url": { "url": image.url, "detail": "high" },
        }));
    }

    json!({
        "role": message.role.as_str(),
        "content": parts,
    })
}

/// Shared `/chat/completions` body. Providers add their own fields on top.
#[derive(Debug, Clone)]
pub struct CompatChatBody {
    pub model: String,
    /// Name of the output budget field (`max_tokens` or `max_completion_tokens`)
    pub max_tokens_field: &'static str,
    pub include_temperature: bool,
}

impl CompatChatBody {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens_field: "max_tokens",
            include_temperature: true,
        }
    }

    pub fn build(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": convert_messages(request),
            "stream": true,
        });
        body[self.max_tokens_field] = json!(request.max_tokens);
        if self.include_temperature {
            body["temperature"] = json!(request.temperature);
        }
        body
    }
}
