//! # streettalk-core
//!
//! Domain layer containing entities, value objects, store ports, and domain errors.
//! This crate has zero dependencies on infrastructure (storage, rendering engines, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    build_thread, Author, EmojiEntry, FeedSort, MediaItem, Post, PostRecord, RenderedContent,
    Thread, ThreadOptions, TrustLevel, VoteSet,
};
pub use error::DomainError;
pub use traits::{
    FeedQuery, FeedSnapshot, FeedStore, MediaRef, MediaStore, Mutation, SnapshotStream,
    StoreResult,
};
pub use value_objects::{FeedPath, PathParseError, PostKey, PushKeyGenerator, UserId};
