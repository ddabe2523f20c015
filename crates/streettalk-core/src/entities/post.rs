//! Post entity - a top-level shout or a reply, with its nested replies

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::rendered::RenderedContent;
use super::user::Author;
use super::vote::VoteSet;
use crate::value_objects::{FeedPath, PostKey, UserId};

/// Media attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Retrievable reference returned by the media store
    pub data: String,
    /// MIME type, e.g. `image/jpeg`
    #[serde(rename = "type")]
    pub content_type: String,
}

impl MediaItem {
    pub fn new(data: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Check if media is an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Check if media is a video
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

/// Stored shape of a post or reply inside the feed tree
///
/// `votes` and `replies` live next to these fields in the same JSON object
/// but are written by other operations, so they are read separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub user_id: UserId,
    pub user: String,
    #[serde(default)]
    pub user_avatar: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_html: Option<String>,
    #[serde(default)]
    pub sanitized: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl PostRecord {
    /// Build a record for `author` from rendered content
    pub fn new(
        author: &Author,
        rendered: &RenderedContent,
        media: Vec<MediaItem>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: author.id.clone(),
            user: author.name.clone(),
            user_avatar: author.avatar.clone(),
            content: rendered.raw_text.clone(),
            rendered_html: Some(rendered.sanitized_html.clone()),
            sanitized: rendered.is_sanitized(),
            media,
            timestamp: timestamp.timestamp_millis(),
        }
    }
}

/// A post with its votes and replies, ready for display
///
/// Stored `renderedHtml` is not carried over: anyone who can write to the
/// feed can also write that field, so display HTML comes from `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub key: PostKey,
    pub path: FeedPath,
    /// 0 for top-level posts, 1 for direct replies, and so on
    pub depth: usize,
    pub author: Author,
    /// Raw text as typed
    pub content: String,
    pub media: Vec<MediaItem>,
    pub timestamp: DateTime<Utc>,
    pub votes: VoteSet,
    pub replies: Vec<Post>,
    /// Replies present in the tree but cut off by the depth limit
    pub omitted_replies: usize,
}

impl Post {
    /// Create a post from its stored record
    pub fn from_record(
        key: PostKey,
        path: FeedPath,
        depth: usize,
        record: PostRecord,
        votes: VoteSet,
    ) -> Self {
        let timestamp = Utc
            .timestamp_millis_opt(record.timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            key,
            path,
            depth,
            author: Author {
                id: record.user_id,
                name: record.user,
                avatar: record.user_avatar,
            },
            content: record.content,
            media: record.media,
            timestamp,
            votes,
            replies: Vec::new(),
            omitted_replies: 0,
        }
    }

    #[inline]
    pub fn vote_count(&self) -> usize {
        self.votes.count()
    }

    pub fn has_voted(&self, voter: &UserId) -> bool {
        self.votes.contains(voter)
    }
}
