//! Composer service
//!
//! Emoji suggestions while typing, insertion of a picked emoji and a live
//! preview of the rendered text.

use tracing::{debug, instrument};

use streettalk_content::{complete_at_caret, pending_shortcode, Completion};
use streettalk_core::RenderedContent;

use crate::dto::Suggestion;

use super::context::ServiceContext;

/// Composer service
pub struct ComposerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ComposerService<'a> {
    /// Create a new ComposerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Emoji suggestions for the `:fragment` ending at `caret`
    ///
    /// `caret` is a byte offset into `text`. No fragment, no suggestions.
    #[instrument(skip(self, text))]
    pub fn suggest(&self, text: &str, caret: usize) -> Vec<Suggestion> {
        let Some(fragment) = pending_shortcode(&text[..char_floor(text, caret)]) else {
            return Vec::new();
        };

        let suggestions: Vec<Suggestion> = self
            .ctx
            .emoji_index()
            .search(fragment, self.ctx.config().emoji.suggestion_limit)
            .into_iter()
            .map(Suggestion::from)
            .collect();

        debug!(fragment, count = suggestions.len(), "Emoji suggestions");
        suggestions
    }

    /// Insert a picked glyph, replacing the selection and any pending fragment
    pub fn complete(
        &self,
        text: &str,
        selection_start: usize,
        selection_end: usize,
        glyph: &str,
    ) -> Completion {
        complete_at_caret(text, selection_start, selection_end, glyph)
    }

    /// Render the draft exactly as it would be stored
    pub fn preview(&self, text: &str) -> RenderedContent {
        self.ctx.renderer().render(text.trim())
    }
}

fn char_floor(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
