//! Emoji dataset loading

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use super::index::EmojiIndex;
use super::record::RawEmojiRecord;
use crate::error::{ContentError, ContentResult};

/// Records read from a dataset, ready to be indexed
#[derive(Debug, Clone, Default)]
pub struct EmojiDataset {
    records: Vec<RawEmojiRecord>,
    skipped: usize,
}

impl EmojiDataset {
    /// Parse a JSON array of records
    ///
    /// Elements that are not records are skipped one by one. Only a document
    /// that is not a JSON array at all is an error.
    pub fn from_json_str(json: &str) -> ContentResult<Self> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| ContentError::InvalidDataset(e.to_string()))?;

        let Value::Array(elements) = document else {
            return Err(ContentError::InvalidDataset(
                "expected a JSON array of records".to_string(),
            ));
        };

        let mut dataset = Self::default();
        for (position, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<RawEmojiRecord>(element) {
                Ok(record) => dataset.records.push(record),
                Err(e) => {
                    let err = ContentError::MalformedDatasetRecord {
                        position,
                        reason: e.to_string(),
                    };
                    debug!(code = err.code(), "{err}");
                    dataset.skipped += 1;
                }
            }
        }

        Ok(dataset)
    }

    /// Read and parse a dataset file
    pub fn from_path(path: impl AsRef<Path>) -> ContentResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::DatasetIo {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            records = dataset.records.len(),
            skipped = dataset.skipped,
            "Emoji dataset loaded"
        );
        Ok(dataset)
    }

    /// Dataset bundled with the `emojis` crate
    pub fn builtin() -> Self {
        let records = emojis::iter()
            .map(|emoji| RawEmojiRecord {
                character: Some(emoji.as_str().to_string()),
                short_name: emoji.shortcode().map(str::to_string),
                name: Some(emoji.name().to_string()),
                short_names: Some(emoji.shortcodes().map(str::to_string).collect()),
                ..RawEmojiRecord::default()
            })
            .collect();

        Self {
            records,
            skipped: 0,
        }
    }

    pub fn records(&self) -> &[RawEmojiRecord] {
        &self.records
    }

    /// Number of elements that could not be read as records
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_index(self) -> EmojiIndex {
        EmojiIndex::build(self.records)
    }
}
