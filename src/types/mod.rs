//! Core types shared by providers and the stream normalizer

pub mod chat;
pub mod model;
pub mod streaming;

pub use chat::{
    ChatMessage, ChatRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ImageInput, MessageRole,
    SystemBlock, SystemInstruction, history_has_images,
};
pub use model::{ModelTable, ModelVariant, RoutedModel};
pub use streaming::{ChatStreamEvent, RawDelta};

/// Extra HTTP settings applied to every request of a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpConfig {
    /// Additional headers sent with each request
    pub headers: std::collections::HashMap<String, String>,
}
