//! Service context - dependency container for services
//!
//! Holds the store ports, the content renderer, configuration and the viewer
//! identity. Built once at startup and passed to every service.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use streettalk_common::{AppConfig, EmojiConfig, IdentityConfig};
use streettalk_content::{ContentRenderer, EmojiDataset, EmojiIndex};
use streettalk_core::{Author, FeedPath, FeedStore, MediaStore, UserId};
use streettalk_store::{InMemoryFeedStore, InlineMediaStore};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    config: Arc<AppConfig>,

    // Stores
    feed_store: Arc<dyn FeedStore>,
    media_store: Arc<dyn MediaStore>,

    // Content
    renderer: Arc<ContentRenderer>,

    // Identity
    viewer: Author,

    /// Root of the feed tree, parsed from `config.feed.topic`
    topic: FeedPath,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        config: Arc<AppConfig>,
        feed_store: Arc<dyn FeedStore>,
        media_store: Arc<dyn MediaStore>,
        renderer: Arc<ContentRenderer>,
        viewer: Author,
    ) -> ServiceResult<Self> {
        let topic = FeedPath::parse(&config.feed.topic)?;
        if topic.is_root() {
            return Err(ServiceError::validation("feed topic must not be empty"));
        }

        Ok(Self {
            config,
            feed_store,
            media_store,
            renderer,
            viewer,
            topic,
        })
    }

    /// Build a context backed by the in-memory stores
    ///
    /// Loads the emoji dataset (falling back to the bundled one) and starts
    /// the sanitizer initialization in the background, so rendering works
    /// immediately in degraded mode.
    pub async fn bootstrap(config: AppConfig) -> ServiceResult<Self> {
        let emoji_config = config.emoji.clone();
        let index = tokio::task::spawn_blocking(move || load_emoji_index(&emoji_config))
            .await
            .map_err(|e| ServiceError::internal(format!("emoji index task failed: {e}")))?;

        let renderer = Arc::new(ContentRenderer::new(Arc::new(index)));
        if config.content.sanitizer_enabled {
            let pending = Arc::clone(&renderer);
            tokio::spawn(async move {
                if let Err(e) = pending.initialize_sanitizer().await {
                    warn!(
                        error = %e,
                        code = e.code(),
                        "Background sanitizer initialization failed, posts stay unsanitized"
                    );
                }
            });
        } else {
            warn!("HTML sanitizer disabled, rendered content will be marked unsanitized");
        }

        let viewer = viewer_from_config(&config.identity);
        let ctx = Self::new(
            Arc::new(config),
            Arc::new(InMemoryFeedStore::new()),
            Arc::new(InlineMediaStore::new()),
            renderer,
            viewer,
        )?;

        info!(
            app = %ctx.config.app.name,
            topic = %ctx.topic,
            emoji_entries = ctx.renderer.index().len(),
            "Service context ready"
        );
        Ok(ctx)
    }

    /// Same dependencies, different viewer
    pub fn with_viewer(&self, viewer: Author) -> Self {
        Self {
            viewer,
            ..self.clone()
        }
    }

    // === Configuration ===

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the feed topic path
    pub fn topic(&self) -> &FeedPath {
        &self.topic
    }

    // === Stores ===

    /// Get the feed store
    pub fn feed_store(&self) -> &dyn FeedStore {
        self.feed_store.as_ref()
    }

    /// Get the media store
    pub fn media_store(&self) -> &dyn MediaStore {
        self.media_store.as_ref()
    }

    // === Content ===

    /// Get the content renderer
    pub fn renderer(&self) -> &ContentRenderer {
        self.renderer.as_ref()
    }

    /// Get the emoji index
    pub fn emoji_index(&self) -> &EmojiIndex {
        self.renderer.index()
    }

    // === Identity ===

    /// Get the identity posting and voting through this context
    pub fn viewer(&self) -> &Author {
        &self.viewer
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("topic", &self.topic)
            .field("viewer", &self.viewer.id)
            .field("sanitizer_ready", &self.renderer.is_sanitizer_ready())
            .field("stores", &"...")
            .finish()
    }
}

/// Build the viewer identity from configuration, generating an id when unset
pub fn viewer_from_config(identity: &IdentityConfig) -> Author {
    let id = identity
        .user_id
        .as_deref()
        .map_or_else(UserId::generate, UserId::new);
    Author::new(id, identity.display_name.as_str(), identity.avatar.as_str())
}

/// Load the configured emoji dataset, or the bundled one
///
/// A dataset that cannot be read is logged and replaced by the bundled one;
/// emoji support is never a reason to refuse to start.
pub fn load_emoji_index(config: &EmojiConfig) -> EmojiIndex {
    let dataset = match config.dataset_path.as_deref().map(Path::new) {
        Some(path) => EmojiDataset::from_path(path).unwrap_or_else(|e| {
            warn!(error = %e, code = e.code(), "Emoji dataset unavailable, using bundled dataset");
            EmojiDataset::builtin()
        }),
        None => EmojiDataset::builtin(),
    };
    dataset.into_index()
}

/// Builder for creating ServiceContext with custom dependencies
pub struct ServiceContextBuilder {
    config: Option<Arc<AppConfig>>,
    feed_store: Option<Arc<dyn FeedStore>>,
    media_store: Option<Arc<dyn MediaStore>>,
    renderer: Option<Arc<ContentRenderer>>,
    viewer: Option<Author>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            feed_store: None,
            media_store: None,
            renderer: None,
            viewer: None,
        }
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    pub fn feed_store(mut self, store: Arc<dyn FeedStore>) -> Self {
        self.feed_store = Some(store);
        self
    }

    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    pub fn renderer(mut self, renderer: Arc<ContentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn viewer(mut self, viewer: Author) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Build the ServiceContext
    ///
    /// Configuration defaults to [`AppConfig::default`] and the viewer to the
    /// configured identity.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a store or the renderer is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        let viewer = self
            .viewer
            .unwrap_or_else(|| viewer_from_config(&config.identity));

        ServiceContext::new(
            config,
            self.feed_store
                .ok_or_else(|| ServiceError::validation("feed_store is required"))?,
            self.media_store
                .ok_or_else(|| ServiceError::validation("media_store is required"))?,
            self.renderer
                .ok_or_else(|| ServiceError::validation("renderer is required"))?,
            viewer,
        )
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
