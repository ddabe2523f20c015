//! In-memory adapters

mod feed_store;
mod media_store;
mod tree;

pub use feed_store::{InMemoryFeedStore, DEFAULT_MAX_MUTATION_ATTEMPTS};
pub use media_store::InlineMediaStore;
