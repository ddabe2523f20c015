//! Response DTOs
//!
//! All response DTOs implement `Serialize` so a UI can consume them as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use streettalk_core::{FeedSort, MediaItem};

// ============================================================================
// Feed Responses
// ============================================================================

/// A post or reply as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub key: String,
    /// Feed path, used to reply to or vote on this post
    pub path: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author_avatar: String,
    /// Raw text as typed
    pub content: String,
    /// Display HTML
    pub html: String,
    /// False when `html` did not go through the sanitizer
    pub sanitized: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    pub timestamp: DateTime<Utc>,
    pub vote_count: usize,
    /// Whether the viewer has upvoted this post
    pub has_voted: bool,
    pub replies: Vec<PostView>,
    /// Replies hidden by the depth limit
    #[serde(skip_serializing_if = "is_zero")]
    pub omitted_replies: usize,
}

/// The feed as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedView {
    pub sort: FeedSort,
    pub posts: Vec<PostView>,
    /// Stored nodes that could not be read as posts
    pub skipped_records: usize,
}

impl FeedView {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

// ============================================================================
// Vote Responses
// ============================================================================

/// State of a vote set after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub count: usize,
    /// Whether the viewer's vote is now present
    pub voted: bool,
}

// ============================================================================
// Composer Responses
// ============================================================================

/// One entry in the emoji dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub shortcode: String,
    /// `:shortcode:` as shown in the list
    pub token: String,
    pub glyph: String,
    pub display_name: String,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
