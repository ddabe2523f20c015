//! # streettalk-store
//!
//! Adapters implementing the store ports defined in `streettalk-core`.
//!
//! ## Overview
//!
//! - [`InMemoryFeedStore`]: a realtime JSON tree with time-ordered push keys,
//!   snapshot subscriptions and optimistic `atomic_mutate`
//! - [`InlineMediaStore`]: keeps media inline as `data:` URLs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use streettalk_core::{FeedPath, FeedQuery, FeedStore};
//! use streettalk_store::InMemoryFeedStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryFeedStore::new();
//!     let topic = FeedPath::parse("shouts")?;
//!     let mut feed = store.subscribe(FeedQuery::new(topic.clone()).limit_to_last(50)).await?;
//!     store.append(&topic, serde_json::json!({ "content": "hi" })).await?;
//!     Ok(())
//! }
//! ```

pub mod memory;

pub use memory::{InMemoryFeedStore, InlineMediaStore, DEFAULT_MAX_MUTATION_ATTEMPTS};
