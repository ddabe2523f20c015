//! HTML escaping

/// Escape `&`, `<` and `>`
///
/// Applied to raw text before Markdown parsing, so anything that looks like
/// a tag is shown as literal text.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a value placed inside a double-quoted attribute
pub fn escape_attribute(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}
