//! OpenAI request construction
//!
//! Reasoning selectors pick an o-series model. Those reject `temperature` and
//! take `reasoning_effort` instead.

use serde_json::{Value, json};

use crate::providers::openai_compatible::CompatChatBody;
use crate::types::{ChatRequest, ModelTable, ModelVariant};

pub const OPENAI_MODELS: ModelTable = ModelTable::new(
    "gpt-4o",
    &[
        (1, "gpt-4o"),
        (2, "gpt-4o-mini"),
        (3, "gpt-4.1"),
        (4, "gpt-4.1-mini"),
    ],
);

pub const OPENAI_REASONING_MODELS: ModelTable =
    ModelTable::new("o4-mini", &[(1, "o4-mini"), (2, "o3"), (3, "o3-mini")]);

/// `reasoning_effort` sent with reasoning selectors
pub const REASONING_EFFORT: &str = "medium";

pub fn select_model(variant: ModelVariant) -> &'static str {
    if variant.reasoning_enabled() {
        OPENAI_REASONING_MODELS.resolve(variant.magnitude())
    } else {
        OPENAI_MODELS.resolve(variant.magnitude())
    }
}

pub fn build_request_body(request: &ChatRequest, variant: ModelVariant) -> Value {
    let reasoning = variant.reasoning_enabled();
    let mut body = CompatChatBody {
        model: select_model(variant).to_string(),
        max_tokens_field: "max_completion_tokens",
        include_temperature: !reasoning,
    }
    .build(request);
    if reasoning {
        body["reasoning_effort"] = json!(REASONING_EFFORT);
    }
    body
}
