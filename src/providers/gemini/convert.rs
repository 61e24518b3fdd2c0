//! Gemini request conversion helpers
//!
//! Convert a [`ChatRequest`] into Gemini's typed request structure. Images
//! are fetched and inlined, so this is the only async step before the call.

use crate::error::LlmError;
use crate::types::{ChatMessage, ChatRequest, MessageRole, ModelTable, ModelVariant};
use crate::utils::image::fetch_images;

use super::types::{
    Blob, Content, GenerateContentRequest, GenerationConfig, Part, ThinkingConfig,
};

pub const GEMINI_MODELS: ModelTable = ModelTable::new(
    "gemini-2.5-flash",
    &[
        (1, "gemini-2.5-flash"),
        (2, "gemini-2.5-pro"),
        (3, "gemini-2.0-flash"),
        (4, "gemini-2.0-flash-lite"),
    ],
);

/// System instruction text plus any system-role history messages.
fn system_text(request: &ChatRequest) -> String {
    let mut sections = Vec::new();
    let joined = request.system.joined();
    if !joined.is_empty() {
        sections.push(joined);
    }
    sections.extend(
        request
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System && !m.content.is_empty())
            .map(|m| m.content.clone()),
    );
    sections.join("\n\n")
}

/// Convert one user/assistant message; inline images precede the text part.
pub async fn convert_message_to_content(
    http_client: &reqwest::Client,
    message: &ChatMessage,
) -> Result<Content, LlmError> {
    let role = match message.role {
        MessageRole::Assistant => "model",
        MessageRole::User | MessageRole::System => "user",
    };

    let mut parts: Vec<Part> = fetch_images(http_client, &message.images)
        .await?
        .into_iter()
        .map(|image| Part::InlineData {
            inline_data: Blob {
                mime_type: image.media_type,
                data: image.data,
            },
        })
        .collect();
    if !message.content.is_empty() || parts.is_empty() {
        parts.push(Part::text(message.content.clone()));
    }

    Ok(Content {
        role: Some(role.to_string()),
        parts,
    })
}

/// Build the typed request for a call.
pub async fn build_request_body(
    http_client: &reqwest::Client,
    request: &ChatRequest,
    variant: ModelVariant,
) -> Result<GenerateContentRequest, LlmError> {
    let mut contents = Vec::with_capacity(request.messages.len());
    for message in request
        .messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
    {
        contents.push(convert_message_to_content(http_client, message).await?);
    }

    let system = system_text(request);
    let system_instruction = (!system.is_empty()).then(|| Content {
        role: None,
        parts: vec![Part::text(system)],
    });

    let thinking_config = variant
        .reasoning_enabled()
        .then_some(ThinkingConfig {
            include_thoughts: true,
        });

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
            thinking_config,
        },
    })
}
