//! Markdown to HTML with link rewriting

use std::sync::LazyLock;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;

use super::escape::escape_attribute;
use super::links::is_safe_href;

/// Bare `http(s)://` and `www.` URLs in plain text
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<]+").expect("bare URL regex must compile")
});

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render Markdown to HTML
///
/// Single newlines become `<br />`. Links with an allowed destination open in
/// a new tab with `rel="noopener noreferrer"`; other links keep only their
/// text. Bare URLs in text become links the same way, except inside code,
/// links and image alt text. Images with a disallowed source are replaced by
/// their alt text. Raw HTML in the source is shown as text.
pub fn render_markdown(source: &str) -> String {
    let mut rewriter = LinkRewriter::default();
    let events = TextMergeStream::new(Parser::new_ext(source, parser_options()))
        .flat_map(|event| rewriter.rewrite(event));

    let mut output = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut output, events);
    output
}

/// Tracks open links and images so their closing tags match the opening decision
#[derive(Debug, Default)]
struct LinkRewriter {
    links: Vec<bool>,
    images: Vec<bool>,
    code_blocks: usize,
}

impl LinkRewriter {
    fn rewrite<'a>(&mut self, event: Event<'a>) -> Vec<Event<'a>> {
        match event {
            Event::Text(text) if self.autolinks_text() => autolink(text),
            Event::Start(Tag::CodeBlock(_)) => {
                self.code_blocks += 1;
                vec![event]
            }
            Event::End(TagEnd::CodeBlock) => {
                self.code_blocks = self.code_blocks.saturating_sub(1);
                vec![event]
            }
            other => self.rewrite_tag(other).into_iter().collect(),
        }
    }

    fn autolinks_text(&self) -> bool {
        self.links.is_empty() && self.images.is_empty() && self.code_blocks == 0
    }

    fn rewrite_tag<'a>(&mut self, event: Event<'a>) -> Option<Event<'a>> {
        match event {
            Event::SoftBreak => Some(Event::HardBreak),
            Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),

            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                let safe = is_safe_href(&dest_url);
                self.links.push(safe);
                let open = if safe {
                    anchor_open(&dest_url, &title)
                } else {
                    "<span>".to_string()
                };
                Some(Event::InlineHtml(CowStr::from(open)))
            }
            Event::End(TagEnd::Link) => {
                let close = if self.links.pop().unwrap_or(false) {
                    "</a>"
                } else {
                    "</span>"
                };
                Some(Event::InlineHtml(CowStr::Borrowed(close)))
            }

            Event::Start(Tag::Image { ref dest_url, .. }) => {
                let safe = is_safe_href(dest_url);
                self.images.push(safe);
                safe.then_some(event)
            }
            Event::End(TagEnd::Image) => self.images.pop().unwrap_or(false).then_some(event),

            other => Some(other),
        }
    }
}

/// Split a text event around the bare URLs it contains
fn autolink(text: CowStr<'_>) -> Vec<Event<'_>> {
    let mut events = Vec::new();
    let mut rest = 0;

    for found in BARE_URL.find_iter(&text) {
        let url = trim_url(found.as_str());
        if url.ends_with("://") || url.eq_ignore_ascii_case("www.") {
            continue;
        }
        let href = if url.to_lowercase().starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        if !is_safe_href(&href) {
            continue;
        }

        if found.start() > rest {
            events.push(Event::Text(CowStr::from(text[rest..found.start()].to_string())));
        }
        events.push(Event::InlineHtml(CowStr::from(anchor_open(&href, ""))));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
        rest = found.start() + url.len();
    }

    if rest == 0 {
        return vec![Event::Text(text)];
    }
    if rest < text.len() {
        events.push(Event::Text(CowStr::from(text[rest..].to_string())));
    }
    events
}

/// Drop trailing punctuation and an unbalanced closing parenthesis
fn trim_url(url: &str) -> &str {
    let mut end = url.len();
    loop {
        let candidate = &url[..end];
        let Some(last) = candidate.chars().last() else {
            break;
        };
        let unbalanced_paren =
            last == ')' && candidate.matches(')').count() > candidate.matches('(').count();
        if matches!(last, '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' | '*' | '_' | '~')
            || unbalanced_paren
        {
            end -= last.len_utf8();
        } else {
            break;
        }
    }
    &url[..end]
}

fn anchor_open(href: &str, title: &str) -> String {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_attribute(title))
    };
    format!(
        r#"<a href="{}"{title_attr} target="_blank" rel="noopener noreferrer">"#,
        escape_attribute(href)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = render_markdown("**bold** and *em* and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_soft_break_becomes_br() {
        let html = render_markdown("line one\nline two");
        assert!(html.contains("line one<br />"));
        assert!(html.contains("line two"));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = render_markdown("~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_safe_link_is_rewritten() {
        let html = render_markdown(r#"[site](https://example.com "Home")"#);
        assert!(html.contains(
            r#"<a href="https://example.com" title="Home" target="_blank" rel="noopener noreferrer">site</a>"#
        ));
    }

    #[test]
    fn test_relative_link_is_kept() {
        let html = render_markdown("[about](/about)");
        assert!(html.contains(r#"<a href="/about" target="_blank""#));
    }

    #[test]
    fn test_unsafe_link_keeps_text_only() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("<a"));
        assert!(!html.contains("javascript"));
        assert!(html.contains("<span>click</span>"));
    }

    #[test]
    fn test_nested_links_close_correctly() {
        let html = render_markdown("[ok](https://a.example) then [bad](data:x) then [ok2](/b)");
        assert_eq!(html.matches("<a ").count(), 2);
        assert_eq!(html.matches("</a>").count(), 2);
        assert_eq!(html.matches("<span>").count(), 1);
        assert_eq!(html.matches("</span>").count(), 1);
    }

    #[test]
    fn test_bare_url_is_linked() {
        let html = render_markdown("visit https://example.com/a?b=1 today");
        assert_eq!(
            html,
            "<p>visit <a href=\"https://example.com/a?b=1\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com/a?b=1</a> today</p>\n"
        );
    }

    #[test]
    fn test_bare_url_trailing_punctuation() {
        let html = render_markdown("see https://example.com. and (https://example.com/x)!");
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(r#">https://example.com</a>. and"#));
        assert!(html.contains(r#">https://example.com/x</a>)!"#));

        let html = render_markdown("https://en.wikipedia.org/wiki/Rust_(language)");
        assert!(html.contains(r#"href="https://en.wikipedia.org/wiki/Rust_(language)""#));
    }

    #[test]
    fn test_www_url_gets_scheme() {
        let html = render_markdown("go to www.example.com now");
        assert!(html.contains(r#"<a href="http://www.example.com" target="_blank""#));
        assert!(html.contains(">www.example.com</a> now"));
    }

    #[test]
    fn test_bare_url_in_code_is_not_linked() {
        let html = render_markdown("`https://example.com`\n\n```\nhttps://example.com\n```");
        assert!(!html.contains("<a"));
        assert!(html.contains("<code>https://example.com</code>"));
    }

    #[test]
    fn test_url_in_link_text_is_not_linked_twice() {
        let html = render_markdown("[https://a.example](https://b.example)");
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(r#"href="https://b.example""#));
    }

    #[test]
    fn test_text_without_urls_is_unchanged() {
        assert_eq!(render_markdown("http is a protocol"), "<p>http is a protocol</p>\n");
        assert_eq!(render_markdown("javascript:alert(1)"), "<p>javascript:alert(1)</p>\n");
        assert_eq!(render_markdown("just https://."), "<p>just https://.</p>\n");
    }

    #[test]
    fn test_images() {
        let html = render_markdown("![cat](https://example.com/cat.png)");
        assert!(html.contains(r#"<img src="https://example.com/cat.png" alt="cat""#));

        let html = render_markdown("![a cat](javascript:alert(1))");
        assert!(!html.contains("<img"));
        assert!(!html.contains("javascript"));
        assert!(html.contains("a cat"));
    }

    #[test]
    fn test_raw_html_is_text() {
        let html = render_markdown("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_attribute_injection_is_escaped() {
        let html = render_markdown(r#"[x](https://a.example "t\" onclick=\"y")"#);
        assert!(!html.contains(r#"" onclick=""#));
    }
}
