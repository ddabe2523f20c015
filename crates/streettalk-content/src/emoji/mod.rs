//! Emoji index and matcher

mod autocomplete;
mod dataset;
mod index;
mod record;

pub use autocomplete::{complete_at_caret, pending_shortcode, Completion};
pub use dataset::EmojiDataset;
pub use index::{normalize_shortcode, EmojiIndex, DEFAULT_SUGGESTION_LIMIT};
pub use record::RawEmojiRecord;
