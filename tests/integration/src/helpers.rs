//! Test helpers for integration tests
//!
//! Provides a harness that wires the services to fresh in-memory stores.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use streettalk_common::AppConfig;
use streettalk_content::{ContentRenderer, EmojiDataset, Sanitizer};
use streettalk_core::{Author, FeedPath, FeedSort, PostKey};
use streettalk_service::dto::{CreatePostRequest, CreateReplyRequest, FeedView};
use streettalk_service::{
    FeedService, PostService, ServiceContext, ServiceContextBuilder, VoteService,
};
use streettalk_store::{InMemoryFeedStore, InlineMediaStore};

use crate::fixtures::{author, EMOJI_DATASET};

/// Service context over in-memory stores, with direct access to the feed store
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<InMemoryFeedStore>,
}

impl TestHarness {
    /// Harness with the fixture dataset and a ready sanitizer
    pub fn start() -> Result<Self> {
        Self::start_with_config(test_config())
    }

    /// Harness with a custom config
    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        let renderer = ContentRenderer::with_sanitizer(test_index()?, Sanitizer::new());
        Self::start_with_renderer(config, renderer)
    }

    /// Harness whose renderer never gets a sanitizer
    pub fn start_degraded() -> Result<Self> {
        Self::start_with_renderer(test_config(), ContentRenderer::new(test_index()?))
    }

    fn start_with_renderer(config: AppConfig, renderer: ContentRenderer) -> Result<Self> {
        let store = Arc::new(InMemoryFeedStore::new());
        let ctx = ServiceContextBuilder::new()
            .config(config)
            .feed_store(store.clone())
            .media_store(Arc::new(InlineMediaStore::new()))
            .renderer(Arc::new(renderer))
            .viewer(author("alice"))
            .build()
            .map_err(|e| anyhow!("failed to build context: {e}"))?;

        Ok(Self { ctx, store })
    }

    /// Context acting as another viewer over the same stores
    pub fn as_viewer(&self, viewer: Author) -> ServiceContext {
        self.ctx.with_viewer(viewer)
    }

    /// Publish a text post and return its path
    pub async fn post(&self, text: &str) -> Result<FeedPath> {
        let key = PostService::new(&self.ctx)
            .create_post(CreatePostRequest::text(text))
            .await
            .map_err(|e| anyhow!("create_post failed: {e}"))?;
        self.path_of(&key)
    }

    /// Reply to `parent` and return the reply's path
    pub async fn reply(&self, parent: &FeedPath, text: &str) -> Result<FeedPath> {
        let key = PostService::new(&self.ctx)
            .create_reply(parent, CreateReplyRequest::new(text))
            .await
            .map_err(|e| anyhow!("create_reply failed: {e}"))?;
        Ok(parent.replies().key(&key)?)
    }

    /// Toggle the harness viewer's upvote
    pub async fn upvote(&self, path: &FeedPath) -> Result<()> {
        VoteService::new(&self.ctx)
            .toggle_upvote(path)
            .await
            .map_err(|e| anyhow!("toggle_upvote failed: {e}"))?;
        Ok(())
    }

    /// Current feed view
    pub async fn feed(&self, sort: FeedSort) -> Result<FeedView> {
        FeedService::new(&self.ctx)
            .snapshot(sort)
            .await
            .map_err(|e| anyhow!("snapshot failed: {e}"))
    }

    /// Path of a top-level post
    pub fn path_of(&self, key: &PostKey) -> Result<FeedPath> {
        Ok(self.ctx.topic().key(key)?)
    }
}

/// Config used by the harness
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.feed.topic = "shouts".to_string();
    config
}

/// Index built from the fixture dataset
pub fn test_index() -> Result<Arc<streettalk_content::EmojiIndex>> {
    let dataset = EmojiDataset::from_json_str(EMOJI_DATASET)?;
    Ok(Arc::new(dataset.into_index()))
}
