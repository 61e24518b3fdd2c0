//! Inline reasoning detection
//!
//! Some routes return reasoning as plain text wrapped in markup such as
//! `<think>...</think>` inside the regular content field. [`NormalizerState`]
//! counts open and close tags over everything the content field has carried
//! so far and classifies each new fragment from those counts.

/// Delimiters that wrap inline reasoning.
///
/// Tags must not overlap themselves (no proper prefix equal to a suffix);
/// `<think>`-style markup never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinkTags {
    pub open: String,
    pub close: String,
}

impl Default for ThinkTags {
    fn default() -> Self {
        Self::new("<think>", "</think>")
    }
}

impl ThinkTags {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    fn longest(&self) -> usize {
        self.open.len().max(self.close.len())
    }
}

/// Channel a content fragment was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Content,
    Reasoning,
}

/// Per-stream tag-balance state.
///
/// Counts are kept incrementally: instead of rescanning the whole content
/// buffer for every fragment, the state keeps the last `longest_tag - 1`
/// bytes seen and only counts matches that end inside the new fragment. The
/// totals are the same as counting over the full buffer, including tags split
/// across fragments.
#[derive(Debug, Clone)]
pub struct NormalizerState {
    tags: ThinkTags,
    open_count: usize,
    close_count: usize,
    carry: String,
    visible: String,
    reasoning: String,
}

impl NormalizerState {
    pub fn new(tags: ThinkTags) -> Self {
        Self {
            tags,
            open_count: 0,
            close_count: 0,
            carry: String::new(),
            visible: String::new(),
            reasoning: String::new(),
        }
    }

    /// Classify one content-field fragment and record it.
    ///
    /// A fragment is reasoning when, after counting it, more open tags than
    /// close tags have been seen, or when the fragment itself moved the close
    /// count (the fragment that completes a close tag, even one split across
    /// fragments, stays in the reasoning channel).
    pub fn classify(&mut self, fragment: &str) -> Channel {
        let close_before = self.close_count;

        let mut window = std::mem::take(&mut self.carry);
        let carried = window.len();
        window.push_str(fragment);

        self.open_count += count_new(&window, &self.tags.open, carried);
        self.close_count += count_new(&window, &self.tags.close, carried);
        self.carry = tail(&window, self.tags.longest().saturating_sub(1)).to_string();

        let channel = if self.open_count > self.close_count || self.close_count != close_before {
            Channel::Reasoning
        } else {
            Channel::Content
        };

        match channel {
            Channel::Reasoning => self.reasoning.push_str(fragment),
            Channel::Content => self.visible.push_str(fragment),
        }
        channel
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// An open tag is still waiting for its close tag.
    pub fn in_reasoning(&self) -> bool {
        self.open_count > self.close_count
    }

    /// Answer text emitted so far, without any reasoning-classified fragment.
    pub fn visible_text(&self) -> &str {
        &self.visible
    }

    /// Content-field text routed to the reasoning channel so far.
    pub fn reasoning_text(&self) -> &str {
        &self.reasoning
    }
}

/// Count occurrences of `tag` in `window` that end past the first `carried`
/// bytes. Matches lying wholly inside the carry were counted already.
fn count_new(window: &str, tag: &str, carried: usize) -> usize {
    if tag.is_empty() {
        return 0;
    }
    window
        .match_indices(tag)
        .filter(|(start, m)| start + m.len() > carried)
        .count()
}

/// Last `keep` bytes of `s`, widened to the previous char boundary.
fn tail(s: &str, keep: usize) -> &str {
    let mut start = s.len().saturating_sub(keep);
    while start > 0 && !s.is_char_boundary(start) {
        start -= 1;
    }
    &s[start..]
}
