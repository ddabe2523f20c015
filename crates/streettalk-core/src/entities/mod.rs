//! Domain entities - core business objects

mod emoji;
mod post;
mod rendered;
mod thread;
mod user;
mod vote;

pub use emoji::EmojiEntry;
pub use post::{MediaItem, Post, PostRecord};
pub use rendered::{RenderedContent, TrustLevel};
pub use thread::{
    build_thread, FeedSort, Thread, ThreadOptions, DEFAULT_MAX_DEPTH,
    MAX_REPLY_DEPTH_LIMIT,
};
pub use user::{Author, DEFAULT_DISPLAY_NAME};
pub use vote::VoteSet;
