//! # streettalk-service
//!
//! Application layer: the use cases behind the composer and the feed.
//!
//! Every service borrows a [`ServiceContext`], which is built once at startup
//! and carries the stores, the content renderer, the configuration and the
//! viewer identity.

pub mod dto;
pub mod services;

pub use services::{
    ComposerService, FeedService, MediaService, PostService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, VoteService,
};
