//! Anthropic request body construction

use serde_json::{Value, json};

use crate::error::LlmError;
use crate::types::{ChatMessage, ChatRequest, MessageRole, ModelTable, ModelVariant};
use crate::utils::image::{EncodedImage, fetch_images};

pub const ANTHROPIC_MODELS: ModelTable = ModelTable::new(
    "claude-sonnet-4-0",
    &[
        (1, "claude-sonnet-4-0"),
        (2, "claude-3-7-sonnet-latest"),
        (3, "claude-opus-4-0"),
        (4, "claude-3-5-haiku-latest"),
    ],
);

/// Smallest thinking budget the API accepts
const MIN_THINKING_BUDGET: u32 = 1024;

/// Thinking budget for a given output limit: half of it, at least 1024.
pub fn thinking_budget(max_tokens: u32) -> u32 {
    (max_tokens / 2).max(MIN_THINKING_BUDGET)
}

/// System blocks, with system-role history messages appended in order.
fn system_blocks(request: &ChatRequest) -> Vec<Value> {
    request
        .system
        .blocks()
        .into_iter()
        .map(|block| block.text)
        .chain(
            request
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System && !m.content.is_empty())
                .map(|m| m.content.clone()),
        )
        .map(|text| json!({ "type": "text", "text": text }))
        .collect()
}

fn image_block(image: EncodedImage) -> Value {
    json!({
        "type": "image",
        "source": {
            "type": "base64",
            "media_type": image.media_type,
            "data": image.data,
        },
    })
}

async fn convert_message(
    http_client: &reqwest::Client,
    message: &ChatMessage,
) -> Result<Value, LlmError> {
    if !message.has_images() {
        return Ok(json!({
            "role": message.role.as_str(),
            "content": message.content,
        }));
    }

    // image blocks go before the text block
    let mut content: Vec<Value> = fetch_images(http_client, &message.images)
        .await?
        .into_iter()
        .map(image_block)
        .collect();
    if !message.content.is_empty() {
        content.push(json!({ "type": "text", "text": message.content }));
    }

    Ok(json!({
        "role": message.role.as_str(),
        "content": content,
    }))
}

/// Build the `/v1/messages` body, fetching every image first.
pub async fn build_request_body(
    http_client: &reqwest::Client,
    request: &ChatRequest,
    variant: ModelVariant,
) -> Result<Value, LlmError> {
    let mut messages = Vec::with_capacity(request.messages.len());
    for message in request
        .messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
    {
        messages.push(convert_message(http_client, message).await?);
    }

    let mut body = json!({
        "model": ANTHROPIC_MODELS.resolve(variant.magnitude()),
        "messages": messages,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "stream": true,
    });

    let system = system_blocks(request);
    if !system.is_empty() {
        body["system"] = Value::Array(system);
    }

    if variant.reasoning_enabled() {
        let budget = thinking_budget(request.max_tokens);
        body["thinking"] = json!({ "type": "enabled", "budget_tokens": budget });
        body["max_tokens"] = json!(request.max_tokens.max(budget + 1));
        // the API rejects any other temperature while thinking
        body["temperature"] = json!(1.0);
    }

    Ok(body)
}
