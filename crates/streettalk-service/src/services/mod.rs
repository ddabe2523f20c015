//! Business logic services
//!
//! Each service validates its input, talks to the store ports through the
//! context and maps domain entities to DTOs.

pub mod composer;
pub mod context;
pub mod error;
pub mod feed;
pub mod media;
pub mod post;
pub mod vote;

// Re-export all services for convenience
pub use composer::ComposerService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use media::MediaService;
pub use post::PostService;
pub use vote::VoteService;
