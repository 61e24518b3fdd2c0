//! Stream normalization
//!
//! Turns one provider's stream of [`RawDelta`]s into the canonical
//! [`ChatStreamEvent`] sequence.
//!
//! Two reasoning shapes are supported:
//! - [`ReasoningMode::NativeField`]: the vendor sends reasoning in its own
//!   field, so each channel maps straight to its event.
//! - [`ReasoningMode::InlineTags`]: reasoning may also arrive inside the content
//!   field wrapped in markup; content fragments go through the tag-balance
//!   check in [`NormalizerState`].
//!
//! Within a chunk the reasoning event (if any) comes before the content event.
//! Chunks with neither channel populated emit nothing. The output ends when
//! the input ends, without a closing event.

mod think_tags;

pub use think_tags::{Channel, NormalizerState, ThinkTags};

use futures::{Stream, StreamExt};

use crate::error::LlmError;
use crate::stream::ChatStream;
use crate::types::{ChatStreamEvent, RawDelta};
use crate::utils::streaming::EventBuilder;

/// How reasoning text reaches us for a given provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasoningMode {
    NativeField,
    InlineTags(ThinkTags),
}

impl ReasoningMode {
    /// Inline mode with `<think>` / `</think>` delimiters.
    pub fn inline_think() -> Self {
        ReasoningMode::InlineTags(ThinkTags::default())
    }
}

/// Stateful classifier for one stream. Not shared between streams.
#[derive(Debug, Clone)]
pub struct StreamNormalizer {
    state: Option<NormalizerState>,
}

impl StreamNormalizer {
    pub fn new(mode: ReasoningMode) -> Self {
        let state = match mode {
            ReasoningMode::NativeField => None,
            ReasoningMode::InlineTags(tags) => Some(NormalizerState::new(tags)),
        };
        Self { state }
    }

    /// Classify one chunk into zero, one or two events.
    pub fn push(&mut self, delta: RawDelta) -> Vec<ChatStreamEvent> {
        let mut builder = EventBuilder::new();

        if let Some(reasoning) = delta.reasoning {
            builder = builder.add_reasoning_delta(reasoning);
        }

        if let Some(content) = delta.content.filter(|c| !c.is_empty()) {
            builder = match self.state.as_mut().map(|s| s.classify(&content)) {
                Some(Channel::Reasoning) => builder.add_reasoning_delta(content),
                Some(Channel::Content) | None => builder.add_content_delta(content),
            };
        }

        builder.build()
    }

    /// Tag-balance state, present in inline mode only.
    pub fn state(&self) -> Option<&NormalizerState> {
        self.state.as_ref()
    }
}

/// Wrap a raw delta stream into a [`ChatStream`].
///
/// The first error from `raw` is forwarded and ends the stream; `raw` is
/// dropped at that point, as it is when the caller drops the returned stream.
pub fn normalize<S>(raw: S, mode: ReasoningMode) -> ChatStream
where
    S: Stream<Item = Result<RawDelta, LlmError>> + Send + 'static,
{
    let mut normalizer = StreamNormalizer::new(mode);
    let out = async_stream::stream! {
        let mut raw = Box::pin(raw);
        while let Some(item) = raw.next().await {
            match item {
                Ok(delta) => {
                    for event in normalizer.push(delta) {
                        yield Ok(event);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    };
    Box::pin(out)
}
