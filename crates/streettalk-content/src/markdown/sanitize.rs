//! HTML sanitization

use std::collections::HashSet;
use std::fmt;

use super::links::SAFE_URL_SCHEMES;

/// Allowlist-based HTML cleaner
///
/// Keeps ammonia's default safe tags and attributes, additionally allows
/// `target` on links and read-only task list checkboxes, forces
/// `rel="noopener noreferrer"` on every link and limits URL schemes to the
/// link allowlist.
pub struct Sanitizer {
    builder: ammonia::Builder<'static>,
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .add_tag_attributes("a", &["target"])
            .add_tags(&["input"])
            .add_tag_attributes("input", &["checked", "disabled"])
            .add_tag_attribute_values("input", "type", &["checkbox"])
            .link_rel(Some("noopener noreferrer"))
            .url_schemes(SAFE_URL_SCHEMES.iter().copied().collect::<HashSet<_>>());

        Self { builder }
    }

    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}
