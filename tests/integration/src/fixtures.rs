//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use streettalk_core::{Author, UserId};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A small emoji dataset in the shape most public datasets use
pub const EMOJI_DATASET: &str = r#"[
    { "char": "🔥", "slug": "fire", "name": "fire" },
    { "char": "😀", "slug": "smile", "short_names": ["happy"] },
    { "emoji": "🎉", "short_name": "tada", "name": "party popper" },
    { "native": "👍", "name": "Thumbs Up", "short_names": ["+1", "thumbsup"] },
    { "char": "🔥", "slug": "fire" },
    { "slug": "no_glyph" },
    42
]"#;

/// Shortcodes the dataset above yields, in index order
pub const EMOJI_SHORTCODES: [&str; 7] = ["fire", "smile", "happy", "tada", "thumbs_up", "+1", "thumbsup"];

/// A fresh author with a unique id
pub fn author(name: &str) -> Author {
    Author::new(
        UserId::new(format!("U{}", unique_suffix())),
        name,
        format!("https://avatars.example.com/{name}.png"),
    )
}

/// Smallest byte string that sniffs as a PNG
pub fn png_bytes() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01".to_vec()
}
