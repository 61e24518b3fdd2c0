//! Message construction macros, exported at the crate root

/// Creates a user message
#[macro_export]
macro_rules! user {
    ($content:expr) => {
        $crate::types::ChatMessage::user($content)
    };
}

/// Creates a system message
#[macro_export]
macro_rules! system {
    ($content:expr) => {
        $crate::types::ChatMessage::system($content)
    };
}

/// Creates an assistant message
#[macro_export]
macro_rules! assistant {
    ($content:expr) => {
        $crate::types::ChatMessage::assistant($content)
    };
}

/// User message with one image reference (`media_type`, then path or URL)
#[macro_export]
macro_rules! user_with_image {
    ($text:expr, $media_type:expr, $url:expr) => {
        $crate::types::ChatMessage::user($text)
            .with_image($crate::types::ImageInput::new($media_type, $url))
    };
}

/// Creates a collection of messages
#[macro_export]
macro_rules! messages {
    ($($msg:expr),* $(,)?) => {
        vec![$($msg),*]
    };
}
