//! Utility modules
//!
//! Streaming plumbing, cancellation, image loading and MIME sniffing shared by
//! every provider.

pub mod cancel;
pub mod http_headers;
pub mod image;
pub mod mime;
pub mod sse_lines;
pub mod streaming;

pub use cancel::{CancelHandle, make_cancellable_stream, with_cancel};
pub use sse_lines::{SseLine, SseLineParser, parse_event_stream};
pub use streaming::*;

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
