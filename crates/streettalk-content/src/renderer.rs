//! Content renderer: the full pipeline from typed text to display HTML

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use streettalk_core::{RenderedContent, TrustLevel};

use crate::emoji::EmojiIndex;
use crate::error::{ContentError, ContentResult};
use crate::markdown::{escape_html, render_markdown, Sanitizer};

/// Renders raw post text into HTML
///
/// Stages run in a fixed order: shortcode expansion, HTML escaping, Markdown
/// rendering with link rewriting, sanitization. The sanitizer is initialized
/// once in the background; until then output is marked
/// [`TrustLevel::Unsanitized`].
#[derive(Debug)]
pub struct ContentRenderer {
    index: Arc<EmojiIndex>,
    sanitizer: OnceCell<Sanitizer>,
}

impl ContentRenderer {
    /// Create a renderer whose sanitizer is not initialized yet
    pub fn new(index: Arc<EmojiIndex>) -> Self {
        Self {
            index,
            sanitizer: OnceCell::new(),
        }
    }

    /// Create a renderer with a ready sanitizer
    pub fn with_sanitizer(index: Arc<EmojiIndex>, sanitizer: Sanitizer) -> Self {
        Self {
            index,
            sanitizer: OnceCell::from(sanitizer),
        }
    }

    pub fn index(&self) -> &Arc<EmojiIndex> {
        &self.index
    }

    /// Build the sanitizer on the blocking pool
    ///
    /// Safe to call more than once and from several tasks; only the first
    /// successful call builds it. On failure the renderer stays degraded and
    /// a later call may try again.
    #[instrument(skip(self))]
    pub async fn initialize_sanitizer(&self) -> ContentResult<()> {
        let result = self
            .sanitizer
            .get_or_try_init(|| async {
                tokio::task::spawn_blocking(Sanitizer::new)
                    .await
                    .map_err(|e| ContentError::SanitizerUnavailable(e.to_string()))
            })
            .await;

        match result {
            Ok(_) => {
                debug!("HTML sanitizer ready");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "HTML sanitizer failed to initialize, rendering stays degraded");
                Err(e)
            }
        }
    }

    /// Check whether rendered output is currently sanitized
    pub fn is_sanitizer_ready(&self) -> bool {
        self.sanitizer.initialized()
    }

    /// Run the pipeline over `raw_text`
    ///
    /// Never fails and never blocks. The raw text is kept verbatim in the
    /// result.
    pub fn render(&self, raw_text: &str) -> RenderedContent {
        let expanded = self.index.expand(raw_text);
        let escaped = escape_html(&expanded);
        let html = render_markdown(&escaped);

        match self.sanitizer.get() {
            Some(sanitizer) => {
                RenderedContent::new(raw_text, sanitizer.clean(&html), TrustLevel::Sanitized)
            }
            None => {
                debug!("Sanitizer not ready, returning unsanitized HTML");
                RenderedContent::new(raw_text, html, TrustLevel::Unsanitized)
            }
        }
    }
}
