//! Post service
//!
//! Handles creation of top-level posts and replies.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use streettalk_core::{DomainError, FeedPath, MediaItem, PostKey, PostRecord, RenderedContent};

use crate::dto::{CreatePostRequest, CreateReplyRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new top-level post as the viewer
    ///
    /// The text is trimmed and rendered before it is stored; a post needs
    /// text or at least one attachment.
    #[instrument(skip(self, request), fields(media = request.media.len()))]
    pub async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<PostKey> {
        request.validate()?;

        let content = request.content.trim();
        if content.is_empty() && request.media.is_empty() {
            return Err(DomainError::EmptyPost.into());
        }

        let rendered = self.render_checked(content)?;
        let key = self
            .append(self.ctx.topic(), &rendered, request.media)
            .await?;

        info!(
            key = %key,
            author = %self.ctx.viewer().id,
            sanitized = rendered.is_sanitized(),
            "Post created"
        );

        Ok(key)
    }

    /// Reply to the post or reply at `parent`
    #[instrument(skip(self, request), fields(parent = %parent))]
    pub async fn create_reply(
        &self,
        parent: &FeedPath,
        request: CreateReplyRequest,
    ) -> ServiceResult<PostKey> {
        request.validate()?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyPost.into());
        }

        self.require_post(parent).await?;

        let rendered = self.render_checked(content)?;
        let key = self
            .append(&parent.replies(), &rendered, Vec::new())
            .await?;

        info!(
            key = %key,
            author = %self.ctx.viewer().id,
            depth = parent.depth(),
            "Reply created"
        );

        Ok(key)
    }

    /// Fail with `PostNotFound` unless a post is stored at `path`
    pub(crate) async fn require_post(&self, path: &FeedPath) -> ServiceResult<()> {
        if !self.ctx.topic().contains(path) || path == self.ctx.topic() {
            return Err(DomainError::PostNotFound(path.to_string()).into());
        }

        let timestamp = path.child("timestamp")?;
        match self.ctx.feed_store().get(&timestamp).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound(path.to_string()).into()),
        }
    }

    fn render_checked(&self, content: &str) -> ServiceResult<RenderedContent> {
        let max = self.ctx.config().content.max_length;
        if content.chars().count() > max {
            return Err(DomainError::ContentTooLong { max }.into());
        }
        Ok(self.ctx.renderer().render(content))
    }

    async fn append(
        &self,
        under: &FeedPath,
        rendered: &RenderedContent,
        media: Vec<MediaItem>,
    ) -> ServiceResult<PostKey> {
        let record = PostRecord::new(self.ctx.viewer(), rendered, media, Utc::now());
        let value = serde_json::to_value(&record)
            .map_err(|e| ServiceError::internal(format!("failed to encode post: {e}")))?;

        Ok(self.ctx.feed_store().append(under, value).await?)
    }
}
