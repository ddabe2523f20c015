//! Media service
//!
//! Checks an uploaded file and turns it into an attachment for a new post.

use tracing::{info, instrument};
use validator::Validate;

use streettalk_core::{DomainError, MediaItem};

use crate::dto::MediaUpload;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store an upload and return the attachment pointing at it
    ///
    /// Only images and videos are accepted. Image bytes must carry a known
    /// image signature. Every failure here is a media error, so the caller
    /// can drop the attachment and keep the draft.
    #[instrument(skip(self, upload), fields(file = %upload.file_name, size = upload.bytes.len()))]
    pub async fn attach(&self, upload: MediaUpload) -> ServiceResult<MediaItem> {
        upload.validate()?;

        if upload.bytes.is_empty() {
            return Err(DomainError::FileReadFailure(format!("{} is empty", upload.file_name)).into());
        }

        let max_bytes = self.ctx.config().media.max_file_size_bytes();
        if upload.bytes.len() > max_bytes {
            return Err(DomainError::MediaTooLarge { max_bytes }.into());
        }

        let content_type = upload.content_type.trim().to_ascii_lowercase();
        if content_type.starts_with("image/") {
            if sniff_image(&upload.bytes).is_none() {
                return Err(DomainError::ImageDecodeFailure(upload.file_name).into());
            }
        } else if !content_type.starts_with("video/") {
            return Err(DomainError::UnsupportedMediaType(content_type).into());
        }

        let size = upload.bytes.len();
        let reference = self
            .ctx
            .media_store()
            .put(upload.bytes, &content_type)
            .await?;

        info!(content_type = %content_type, size, "Media attached");
        Ok(MediaItem::new(reference.into_inner(), content_type))
    }
}

/// Name of the image format the bytes start with, if any
fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 6] = [
        (b"\x89PNG\r\n\x1a\n", "png"),
        (b"\xff\xd8\xff", "jpeg"),
        (b"GIF87a", "gif"),
        (b"GIF89a", "gif"),
        (b"BM", "bmp"),
        (b"RIFF", "webp"),
    ];

    SIGNATURES
        .iter()
        .find(|(magic, format)| {
            bytes.starts_with(magic) && (*format != "webp" || bytes.get(8..12) == Some(&b"WEBP"[..]))
        })
        .map(|(_, format)| *format)
}
