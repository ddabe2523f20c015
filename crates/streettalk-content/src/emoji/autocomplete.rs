//! Composer helpers: find the shortcode being typed and replace it

use regex::Regex;
use std::sync::LazyLock;

/// A `:fragment` that ends right at the caret
static PENDING_SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):([a-z0-9_+\-]+)$").expect("pending shortcode pattern is valid")
});

/// Text and caret position after inserting a glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Byte offset of the caret, just after the inserted glyph
    pub caret: usize,
}

/// Return the shortcode fragment the caret is inside of, without the colon
///
/// `before_caret` is the composer text up to the caret.
pub fn pending_shortcode(before_caret: &str) -> Option<&str> {
    PENDING_SHORTCODE
        .captures(before_caret)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Insert `glyph` at the caret
///
/// A pending `:fragment` right before the selection is replaced together with
/// the selection. Offsets are bytes; they are clamped to the text and moved
/// back to the nearest char boundary.
pub fn complete_at_caret(
    text: &str,
    selection_start: usize,
    selection_end: usize,
    glyph: &str,
) -> Completion {
    let mut start = floor_char_boundary(text, selection_start);
    let mut end = floor_char_boundary(text, selection_end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let replace_from = match pending_shortcode(&text[..start]) {
        Some(fragment) => start - fragment.len() - 1,
        None => start,
    };

    let mut completed = String::with_capacity(text.len() + glyph.len());
    completed.push_str(&text[..replace_from]);
    completed.push_str(glyph);
    completed.push_str(&text[end..]);

    Completion {
        text: completed,
        caret: replace_from + glyph.len(),
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
