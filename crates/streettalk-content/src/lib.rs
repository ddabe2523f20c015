//! # streettalk-content
//!
//! Turns what people type into display-ready HTML.
//!
//! - [`EmojiIndex`]: shortcode lookup, ranked search and `:shortcode:` expansion
//! - [`ContentRenderer`]: expand, escape, Markdown, link rewriting and sanitization
//!
//! The renderer never fails. Until the sanitizer has been initialized it
//! produces [`TrustLevel::Unsanitized`](streettalk_core::TrustLevel) output.

pub mod emoji;
pub mod error;
pub mod markdown;
pub mod renderer;

pub use emoji::{
    complete_at_caret, normalize_shortcode, pending_shortcode, Completion, EmojiDataset,
    EmojiIndex, RawEmojiRecord, DEFAULT_SUGGESTION_LIMIT,
};
pub use error::{ContentError, ContentResult};
pub use markdown::{escape_html, is_safe_href, render_markdown, Sanitizer};
pub use renderer::ContentRenderer;
