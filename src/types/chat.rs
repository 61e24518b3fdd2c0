//! Chat request types shared by every provider

use serde::{Deserialize, Serialize};

/// Default sampling temperature used when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output budget.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Image attached to a chat message.
///
/// `url` may be a local path, a `file://` URL, an `http(s)` URL or a `data:`
/// URL. Whether the image is sent inline or by reference is decided by the
/// provider, not by the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInput {
    /// MIME type such as `image/png`. May be empty, in which case it is sniffed
    /// from the bytes or the path when the provider needs inline data.
    pub media_type: String,
    pub url: String,
}

impl ImageInput {
    pub fn new(media_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            url: url.into(),
        }
    }

    /// True for `http://` and `https://` references.
    pub fn is_remote(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    pub fn is_data_url(&self) -> bool {
        self.url.starts_with("data:")
    }
}

/// One turn of the chat history. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageInput>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Attach an image
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.images.push(image);
        self
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// True when at least one message anywhere in the history carries an image.
pub fn history_has_images(messages: &[ChatMessage]) -> bool {
    messages.iter().any(ChatMessage::has_images)
}

/// A labeled block of a system instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemBlock {
    pub text: String,
}

impl SystemBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// System instruction as a single string or as ordered text blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemInstruction {
    Text(String),
    Blocks(Vec<SystemBlock>),
}

impl Default for SystemInstruction {
    fn default() -> Self {
        SystemInstruction::Text(String::new())
    }
}

impl SystemInstruction {
    /// Single-string form; blocks are joined with a blank line.
    pub fn joined(&self) -> String {
        match self {
            SystemInstruction::Text(text) => text.clone(),
            SystemInstruction::Blocks(blocks) => blocks
                .iter()
                .map(|b| b.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    /// Block form; a plain string becomes one block.
    pub fn blocks(&self) -> Vec<SystemBlock> {
        match self {
            SystemInstruction::Text(text) if text.is_empty() => Vec::new(),
            SystemInstruction::Text(text) => vec![SystemBlock::new(text.clone())],
            SystemInstruction::Blocks(blocks) => {
                blocks.iter().filter(|b| !b.text.is_empty()).cloned().collect()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SystemInstruction::Text(text) => text.is_empty(),
            SystemInstruction::Blocks(blocks) => blocks.iter().all(|b| b.text.is_empty()),
        }
    }
}

impl From<&str> for SystemInstruction {
    fn from(value: &str) -> Self {
        SystemInstruction::Text(value.to_string())
    }
}

impl From<String> for SystemInstruction {
    fn from(value: String) -> Self {
        SystemInstruction::Text(value)
    }
}

impl From<Vec<SystemBlock>> for SystemInstruction {
    fn from(value: Vec<SystemBlock>) -> Self {
        SystemInstruction::Blocks(value)
    }
}

/// Everything a provider needs besides the model selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub system: SystemInstruction,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system: SystemInstruction::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<SystemInstruction>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn has_images(&self) -> bool {
        history_has_images(&self.messages)
    }
}
