//! Link allowlist

/// Prefixes an href must start with (after trim and lowercase)
pub const SAFE_HREF_PREFIXES: [&str; 8] = [
    "http://", "https://", "mailto:", "tel:", "ftp:", "/", "./", "../",
];

/// URL schemes the sanitizer lets through
pub const SAFE_URL_SCHEMES: [&str; 5] = ["http", "https", "mailto", "tel", "ftp"];

/// Check a link or image destination against the allowlist
///
/// Everything else, including `javascript:`, `data:` and bare relative
/// names such as `page.html`, is unsafe.
pub fn is_safe_href(href: &str) -> bool {
    let lower = href.trim().to_lowercase();
    !lower.is_empty()
        && SAFE_HREF_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
}
