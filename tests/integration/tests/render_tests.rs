//! Rendering pipeline integration tests
//!
//! Run with: cargo test -p integration-tests --test render_tests

use std::sync::Arc;

use integration_tests::test_index;
use streettalk_content::{escape_html, is_safe_href, render_markdown, ContentRenderer};
use streettalk_core::TrustLevel;

fn ready_renderer() -> ContentRenderer {
    ContentRenderer::with_sanitizer(test_index().unwrap(), streettalk_content::Sanitizer::new())
}

#[test]
fn test_plain_text_round_trip() {
    let renderer = ready_renderer();
    for text in ["hello world", "just some words 123", "emoji 😀 inline"] {
        let rendered = renderer.render(text);
        assert_eq!(rendered.sanitized_html, format!("<p>{text}</p>\n"));
        assert_eq!(rendered.trust, TrustLevel::Sanitized);
    }
}

#[test]
fn test_bold_with_literal_tag() {
    assert_eq!(escape_html("**bold** <b>x</b>"), "**bold** &lt;b&gt;x&lt;/b&gt;");

    let rendered = ready_renderer().render("**bold** <b>x</b>");
    assert!(rendered.sanitized_html.contains("<strong>bold</strong>"));
    assert!(rendered.sanitized_html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(!rendered.sanitized_html.contains("<b>"));
}

#[test]
fn test_script_never_survives() {
    let renderer = ready_renderer();
    let degraded = ContentRenderer::new(test_index().unwrap());

    for text in [
        "<script>alert(1)</script>",
        "hi <script src=x></script> there",
        "`<script>`",
        "    <script>alert(1)</script>",
    ] {
        for rendered in [renderer.render(text), degraded.render(text)] {
            assert!(
                !rendered.sanitized_html.to_lowercase().contains("<script"),
                "{text} -> {}",
                rendered.sanitized_html
            );
        }
    }
}

#[test]
fn test_link_allowlist() {
    let renderer = ready_renderer();

    let unsafe_link = renderer.render("[click](javascript:alert(1))");
    assert!(!unsafe_link.sanitized_html.contains("<a"));
    assert!(unsafe_link.sanitized_html.contains("click"));

    let safe_link = renderer.render("[site](https://example.com)");
    assert!(safe_link.sanitized_html.contains(r#"href="https://example.com""#));
    assert!(safe_link.sanitized_html.contains(r#"target="_blank""#));

    assert!(!is_safe_href("javascript:alert(1)"));
    assert!(is_safe_href("https://example.com"));
}

#[test]
fn test_soft_break_becomes_line_break() {
    let html = render_markdown("line one\nline two");
    assert!(html.contains("<br />"));
    assert!(ready_renderer().render("line one\nline two").sanitized_html.contains("<br"));
}

#[test]
fn test_shortcodes_expand_before_markdown() {
    let rendered = ready_renderer().render("*so* :fire:");
    assert_eq!(rendered.sanitized_html, "<p><em>so</em> 🔥</p>\n");
}

#[tokio::test]
async fn test_degraded_until_sanitizer_ready() {
    let renderer = Arc::new(ContentRenderer::new(test_index().unwrap()));

    let before = renderer.render("hi");
    assert_eq!(before.trust, TrustLevel::Unsanitized);

    renderer.initialize_sanitizer().await.unwrap();
    assert!(renderer.is_sanitizer_ready());

    let after = renderer.render("hi");
    assert_eq!(after.trust, TrustLevel::Sanitized);
    assert_eq!(after.sanitized_html, before.sanitized_html);
}
