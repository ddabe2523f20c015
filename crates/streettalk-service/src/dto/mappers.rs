//! Entity to DTO mappers

use streettalk_content::ContentRenderer;
use streettalk_core::{EmojiEntry, Post, UserId};

use super::responses::{PostView, Suggestion};

// ============================================================================
// Emoji Mappers
// ============================================================================

impl From<&EmojiEntry> for Suggestion {
    fn from(entry: &EmojiEntry) -> Self {
        Self {
            shortcode: entry.shortcode.clone(),
            token: entry.token(),
            glyph: entry.glyph.clone(),
            display_name: entry.display_name.clone(),
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostView {
    /// Map a post tree for `viewer`
    ///
    /// HTML is always rendered from the raw text. Stored `renderedHtml` and
    /// its `sanitized` flag are client-writable and never shown.
    pub fn from_post(post: &Post, viewer: &UserId, renderer: &ContentRenderer) -> Self {
        let rendered = renderer.render(&post.content);

        Self {
            key: post.key.to_string(),
            path: post.path.to_string(),
            author_id: post.author.id.to_string(),
            author_name: post.author.name.clone(),
            author_avatar: post.author.avatar.clone(),
            content: post.content.clone(),
            html: rendered.sanitized_html,
            sanitized: rendered.trust.is_sanitized(),
            media: post.media.clone(),
            timestamp: post.timestamp,
            vote_count: post.vote_count(),
            has_voted: post.has_voted(viewer),
            replies: post
                .replies
                .iter()
                .map(|reply| Self::from_post(reply, viewer, renderer))
                .collect(),
            omitted_replies: post.omitted_replies,
        }
    }
}
