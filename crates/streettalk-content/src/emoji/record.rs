//! One element of an emoji dataset, as found in the wild

use serde::Deserialize;

/// Loosely shaped dataset record
///
/// Different emoji datasets name their fields differently, so every field is
/// optional and the index picks the first one present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEmojiRecord {
    #[serde(rename = "char", default)]
    pub character: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_names: Option<Vec<String>>,
}

impl RawEmojiRecord {
    /// Canonical glyph: first non-empty of `char`, `emoji`, `native`
    pub fn glyph(&self) -> Option<&str> {
        first_non_empty([&self.character, &self.emoji, &self.native])
    }

    /// Canonical short name before normalization: first non-empty of `slug`, `short_name`, `name`
    pub fn primary_name(&self) -> Option<&str> {
        first_non_empty([&self.slug, &self.short_name, &self.name])
    }

    /// Additional shortcodes, in dataset order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.short_names.iter().flatten().map(String::as_str)
    }
}

fn first_non_empty<const N: usize>(fields: [&Option<String>; N]) -> Option<&str> {
    fields
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|value| !value.is_empty())
}
