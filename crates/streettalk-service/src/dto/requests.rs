//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate`. Length limits
//! that depend on configuration are checked by the services.

use serde::Deserialize;
use streettalk_core::MediaItem;
use validator::Validate;

/// Attachments allowed on one post
pub const MAX_ATTACHMENTS: usize = 4;

// ============================================================================
// Post Requests
// ============================================================================

/// New top-level post
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Raw text as typed; may be blank when media is attached
    #[serde(default)]
    #[validate(length(max = 20000, message = "Post must be at most 20000 characters"))]
    pub content: String,

    /// Attachments already accepted by `MediaService::attach`
    #[serde(default)]
    #[validate(length(max = 4, message = "At most 4 attachments per post"))]
    pub media: Vec<MediaItem>,
}

impl CreatePostRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            media: Vec::new(),
        }
    }
}

/// Reply to a post or to another reply
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, max = 20000, message = "Reply must be 1-20000 characters"))]
    pub content: String,
}

impl CreateReplyRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// ============================================================================
// Media Requests
// ============================================================================

/// A file picked in the composer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MediaUpload {
    #[validate(length(max = 255, message = "File name must be at most 255 characters"))]
    #[serde(default)]
    pub file_name: String,

    /// Declared MIME type, e.g. `image/png`
    #[validate(length(min = 1, max = 127, message = "File type must be 1-127 characters"))]
    pub content_type: String,

    #[serde(default)]
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
