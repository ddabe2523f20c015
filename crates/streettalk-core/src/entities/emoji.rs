//! Emoji entry - one shortcode to glyph mapping

use serde::{Deserialize, Serialize};

/// A single searchable shortcode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiEntry {
    /// Normalized shortcode (lowercase, underscores), unique within an index
    pub shortcode: String,
    /// The emoji character or sequence to render
    pub glyph: String,
    /// Human readable name used for secondary matching
    pub display_name: String,
}

impl EmojiEntry {
    pub fn new(
        shortcode: impl Into<String>,
        glyph: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            glyph: glyph.into(),
            display_name: display_name.into(),
        }
    }

    /// The `:shortcode:` form shown in suggestion lists
    pub fn token(&self) -> String {
        format!(":{}:", self.shortcode)
    }
}
