//! Content errors
//!
//! None of these reach the person typing: malformed dataset records are
//! skipped and a missing sanitizer only degrades the output.

use std::path::PathBuf;

/// Errors raised while loading emoji data or preparing the sanitizer
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Malformed emoji record at position {position}: {reason}")]
    MalformedDatasetRecord { position: usize, reason: String },

    #[error("Invalid emoji dataset: {0}")]
    InvalidDataset(String),

    #[error("Could not read emoji dataset {path}: {source}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTML sanitizer unavailable: {0}")]
    SanitizerUnavailable(String),
}

impl ContentError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDatasetRecord { .. } => "MALFORMED_DATASET_RECORD",
            Self::InvalidDataset(_) => "INVALID_DATASET",
            Self::DatasetIo { .. } => "DATASET_IO",
            Self::SanitizerUnavailable(_) => "SANITIZER_UNAVAILABLE",
        }
    }
}

/// Result type alias for content operations
pub type ContentResult<T> = Result<T, ContentError>;
