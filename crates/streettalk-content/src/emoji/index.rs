//! Emoji index: construction, ranked search and shortcode expansion

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use streettalk_core::EmojiEntry;
use tracing::debug;

use super::record::RawEmojiRecord;

/// Number of suggestions shown by the composer
pub const DEFAULT_SUGGESTION_LIMIT: usize = 12;

/// `:name:` with the closing colon optional
static SHORTCODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):([a-z0-9_+\-]+):?").expect("shortcode token pattern is valid")
});

/// Normalize a short name into a shortcode
///
/// Trims, collapses internal whitespace runs into `_` and lowercases.
pub fn normalize_shortcode(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase()
}

/// Immutable shortcode index
///
/// Entries keep dataset order, which is also the tie-break order for search
/// results. The first record to claim a shortcode owns it.
#[derive(Debug, Clone, Default)]
pub struct EmojiIndex {
    entries: Vec<EmojiEntry>,
    by_shortcode: HashMap<String, usize>,
}

impl EmojiIndex {
    /// Build the index from dataset records
    ///
    /// Never fails. Records without a glyph or without a usable name are
    /// skipped, and later duplicates of a shortcode are dropped.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawEmojiRecord>,
    {
        let mut index = Self::default();
        let mut discarded = 0usize;

        for record in records {
            let (Some(glyph), Some(primary)) = (record.glyph(), record.primary_name()) else {
                discarded += 1;
                continue;
            };

            let display_name = record.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(primary);
            if !index.insert(normalize_shortcode(primary), glyph, display_name) {
                discarded += 1;
            }

            for alias in record.aliases() {
                index.insert(normalize_shortcode(alias), glyph, alias);
            }
        }

        debug!(
            entries = index.entries.len(),
            discarded, "Emoji index built"
        );
        index
    }

    /// Returns false when the shortcode is empty or already taken
    fn insert(&mut self, shortcode: String, glyph: &str, display_name: &str) -> bool {
        if shortcode.is_empty() || self.by_shortcode.contains_key(&shortcode) {
            return false;
        }

        self.by_shortcode.insert(shortcode.clone(), self.entries.len());
        self.entries
            .push(EmojiEntry::new(shortcode, glyph, display_name));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EmojiEntry] {
        &self.entries
    }

    /// Exact lookup by normalized shortcode
    pub fn get(&self, shortcode: &str) -> Option<&EmojiEntry> {
        self.by_shortcode
            .get(shortcode)
            .map(|&position| &self.entries[position])
    }

    /// Ranked suggestions for a partial shortcode
    ///
    /// Prefix matches on the shortcode come first, then substring matches on
    /// the shortcode or the display name. Both groups keep index order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&EmojiEntry> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let query = query.to_lowercase();
        let mut starts = Vec::new();
        let mut contains = Vec::new();

        for entry in &self.entries {
            if entry.shortcode.starts_with(&query) {
                starts.push(entry);
                if starts.len() == limit {
                    break;
                }
            } else if contains.len() < limit
                && (entry.shortcode.contains(&query)
                    || entry.display_name.to_lowercase().contains(&query))
            {
                contains.push(entry);
            }
        }

        starts.extend(contains);
        starts.truncate(limit);
        starts
    }

    /// Replace every known `:shortcode:` token with its glyph
    ///
    /// Unknown tokens are left exactly as typed. The closing colon is optional
    /// and is consumed together with the name when present.
    pub fn expand<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.is_empty() {
            return Cow::Borrowed(text);
        }

        SHORTCODE_TOKEN.replace_all(text, |caps: &Captures<'_>| {
            match self.get(&caps[1].to_lowercase()) {
                Some(entry) => entry.glyph.clone(),
                None => caps[0].to_string(),
            }
        })
    }
}

impl FromIterator<RawEmojiRecord> for EmojiIndex {
    fn from_iter<T: IntoIterator<Item = RawEmojiRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}
