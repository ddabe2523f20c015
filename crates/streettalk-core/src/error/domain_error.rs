//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::PathParseError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid feed path: {0}")]
    InvalidPath(#[from] PathParseError),

    #[error("Post has neither text nor media")]
    EmptyPost,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Media Errors
    // =========================================================================
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Could not read file: {0}")]
    FileReadFailure(String),

    #[error("Could not decode image: {0}")]
    ImageDecodeFailure(String),

    #[error("File too large: max {max_bytes} bytes")]
    MediaTooLarge { max_bytes: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Too many conflicting writes at {path} after {attempts} attempts")]
    MutationConflict { path: String, attempts: u32 },
}

impl DomainError {
    /// Get an error code string for notices and logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::EmptyPost => "EMPTY_POST",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Media
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::FileReadFailure(_) => "FILE_READ_FAILURE",
            Self::ImageDecodeFailure(_) => "IMAGE_DECODE_FAILURE",
            Self::MediaTooLarge { .. } => "MEDIA_TOO_LARGE",

            // Conflict
            Self::MutationConflict { .. } => "MUTATION_CONFLICT",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidPath(_)
                | Self::EmptyPost
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this error only affects a single attachment
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMediaType(_)
                | Self::FileReadFailure(_)
                | Self::ImageDecodeFailure(_)
                | Self::MediaTooLarge { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MutationConflict { .. })
    }
}
