//! Cancellation utilities
//!
//! The normalizer never aborts transports itself. A caller that wants to stop
//! early either drops the [`ChatStream`] or cancels it through a
//! [`CancelHandle`]; in both cases the wrapped stream is dropped, which drops
//! the HTTP body reader and closes the connection.

use tokio_util::sync::CancellationToken;

use crate::stream::{ChatStream, ChatStreamHandle};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Request cancellation. A pending read on the wrapped stream is
    /// interrupted and the underlying reader released.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Make a ChatStream cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: ChatStream) -> (ChatStream, CancelHandle) {
    let token = CancellationToken::new();
    let handle = CancelHandle::new(token.clone());
    let s = async_stream::stream! {
        use futures::StreamExt;
        let mut inner = stream;
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                item = inner.next() => item,
            };
            let Some(item) = next else {
                break;
            };
            yield item;
        }
        // release the reader before the wrapper itself is dropped
        drop(inner);
        tracing::trace!("chat stream released");
    };
    (Box::pin(s), handle)
}

/// Wrap a stream into a [`ChatStreamHandle`].
pub fn with_cancel(stream: ChatStream) -> ChatStreamHandle {
    let (stream, cancel) = make_cancellable_stream(stream);
    ChatStreamHandle { stream, cancel }
}
