//! Data transfer objects for requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for composer inputs
//! - Response DTOs handed to the UI
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreatePostRequest, CreateReplyRequest, MediaUpload, MAX_ATTACHMENTS};
pub use responses::{FeedView, PostView, Suggestion, VoteOutcome};
