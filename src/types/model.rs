//! Model selection
//!
//! Four providers take a signed integer selector: `N > 0` picks standard
//! variant `N`, `N < 0` picks variant `|N|` with extended reasoning turned on.
//! The sign is the only carrier of the reasoning flag. The aggregator takes a
//! [`RoutedModel`] instead.

use serde::{Deserialize, Serialize};

/// Signed model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelVariant(pub i32);

impl ModelVariant {
    /// Variant `|n|` without reasoning.
    pub const fn standard(n: i32) -> Self {
        Self(n.saturating_abs())
    }

    /// Variant `|n|` with reasoning.
    pub const fn reasoning(n: i32) -> Self {
        Self(-n.saturating_abs())
    }

    pub fn magnitude(&self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn reasoning_enabled(&self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for ModelVariant {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Aggregator model selector: a vendor-qualified model name plus reasoning flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutedModel {
    pub name: String,
    pub reasoning: bool,
}

impl RoutedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reasoning: false,
        }
    }

    pub fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.reasoning = reasoning;
        self
    }
}

/// Fixed magnitude → model id table. Unmapped magnitudes (including zero)
/// resolve to the default instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct ModelTable {
    pub default: &'static str,
    pub entries: &'static [(u32, &'static str)],
}

impl ModelTable {
    pub const fn new(default: &'static str, entries: &'static [(u32, &'static str)]) -> Self {
        Self { default, entries }
    }

    pub fn resolve(&self, magnitude: u32) -> &'static str {
        self.entries
            .iter()
            .find(|(n, _)| *n == magnitude)
            .map(|(_, id)| *id)
            .unwrap_or(self.default)
    }
}
