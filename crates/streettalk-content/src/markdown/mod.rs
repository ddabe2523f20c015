//! Markdown pipeline stages
//!
//! Escape, render with link rewriting, sanitize. The stages are composed by
//! [`ContentRenderer`](crate::ContentRenderer).

mod escape;
mod links;
mod render;
mod sanitize;

pub use escape::{escape_attribute, escape_html};
pub use links::{is_safe_href, SAFE_HREF_PREFIXES, SAFE_URL_SCHEMES};
pub use render::render_markdown;
pub use sanitize::Sanitizer;
