//! Inline media storage
//!
//! Media is kept inside the post record as a `data:` URL, the same shape the
//! feed tree stores for attachments.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, instrument};

use streettalk_core::{DomainError, MediaRef, MediaStore, StoreResult};

/// MediaStore that encodes blobs as `data:` URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMediaStore;

impl InlineMediaStore {
    pub fn new() -> Self {
        Self
    }

    /// Encode bytes as a `data:<type>;base64,` URL
    pub fn data_url(bytes: &[u8], content_type: &str) -> String {
        format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
    }
}

#[async_trait]
impl MediaStore for InlineMediaStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> StoreResult<MediaRef> {
        let content_type = content_type.trim();
        if content_type.is_empty() || content_type.contains([';', ',', ' ']) {
            return Err(DomainError::UnsupportedMediaType(content_type.to_string()));
        }

        let url = Self::data_url(&bytes, content_type);
        debug!(content_type, encoded_len = url.len(), "Media stored inline");
        Ok(MediaRef::new(url))
    }
}
