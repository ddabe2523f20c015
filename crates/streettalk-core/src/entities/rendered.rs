//! Rendered content - display-ready HTML derived from raw user text

use serde::{Deserialize, Serialize};

/// How much of the rendering pipeline ran over a piece of HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    /// Every stage ran, including the HTML sanitizer
    Sanitized,
    /// Degraded output: escaped and rendered, but not sanitized
    #[default]
    Unsanitized,
}

impl TrustLevel {
    #[inline]
    pub fn is_sanitized(self) -> bool {
        matches!(self, Self::Sanitized)
    }
}

/// Raw text together with the HTML produced from it
///
/// The raw text is kept verbatim so the HTML can be recomputed when the
/// rendering rules change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedContent {
    pub raw_text: String,
    pub sanitized_html: String,
    pub trust: TrustLevel,
}

impl RenderedContent {
    pub fn new(raw_text: impl Into<String>, sanitized_html: String, trust: TrustLevel) -> Self {
        Self {
            raw_text: raw_text.into(),
            sanitized_html,
            trust,
        }
    }

    /// Check whether the HTML went through the sanitizer
    #[inline]
    pub fn is_sanitized(&self) -> bool {
        self.trust.is_sanitized()
    }
}
