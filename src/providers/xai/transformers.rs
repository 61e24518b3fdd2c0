//! xAI request construction and model routing

use serde_json::{Value, json};

use crate::providers::openai_compatible::CompatChatBody;
use crate::types::{ChatMessage, ChatRequest, ModelTable, ModelVariant, history_has_images};

pub const XAI_MODELS: ModelTable = ModelTable::new(
    "grok-3",
    &[(1, "grok-3"), (2, "grok-3-mini"), (3, "grok-4")],
);

/// Models accepting `reasoning_effort`
pub const XAI_REASONING_MODELS: ModelTable = ModelTable::new(
    "grok-3-mini",
    &[(1, "grok-3-mini"), (2, "grok-3-mini-fast")],
);

/// Used for any history carrying an image, whatever the selector says
pub const XAI_VISION_MODEL: &str = "grok-2-vision-1212";

/// Model for a history and selector.
pub fn select_model(variant: ModelVariant, messages: &[ChatMessage]) -> &'static str {
    if history_has_images(messages) {
        XAI_VISION_MODEL
    } else if variant.reasoning_enabled() {
        XAI_REASONING_MODELS.resolve(variant.magnitude())
    } else {
        XAI_MODELS.resolve(variant.magnitude())
    }
}

pub fn build_request_body(request: &ChatRequest, variant: ModelVariant) -> Value {
    let model = select_model(variant, &request.messages);
    let mut body = CompatChatBody::new(model).build(request);
    // the vision model has no reasoning mode
    if variant.reasoning_enabled() && model != XAI_VISION_MODEL {
        body["reasoning_effort"] = json!("high");
    }
    body
}
