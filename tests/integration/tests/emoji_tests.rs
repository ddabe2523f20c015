//! Emoji index integration tests
//!
//! Run with: cargo test -p integration-tests --test emoji_tests

use std::collections::HashSet;

use integration_tests::{test_index, TestHarness, EMOJI_SHORTCODES};
use streettalk_content::{EmojiDataset, EmojiIndex, RawEmojiRecord};
use streettalk_service::ComposerService;

// ============================================================================
// Index Construction
// ============================================================================

#[test]
fn test_fixture_dataset_builds_expected_index() {
    let index = test_index().unwrap();
    let codes: Vec<&str> = index.entries().iter().map(|e| e.shortcode.as_str()).collect();
    assert_eq!(codes, EMOJI_SHORTCODES);

    assert_eq!(index.get("tada").unwrap().display_name, "party popper");
    assert_eq!(index.get("thumbsup").unwrap().glyph, "👍");
}

#[test]
fn test_shortcodes_are_unique() {
    let records = (0..50).map(|i| RawEmojiRecord {
        character: Some(format!("g{i}")),
        slug: Some(format!("code{}", i % 7)),
        short_names: Some(vec![format!("code{}", i % 5), "shared".to_string()]),
        ..RawEmojiRecord::default()
    });
    let index = EmojiIndex::build(records);

    let unique: HashSet<&str> = index.entries().iter().map(|e| e.shortcode.as_str()).collect();
    assert_eq!(unique.len(), index.len());
    // First record wins every contested shortcode
    assert_eq!(index.get("shared").unwrap().glyph, "g0");
}

#[test]
fn test_smile_and_fire_scenario() {
    let dataset = EmojiDataset::from_json_str(
        r#"[{"char":"🔥","slug":"fire"},{"char":"😀","slug":"smile","short_names":["happy"]}]"#,
    )
    .unwrap();
    let index = dataset.into_index();

    assert_eq!(index.len(), 3);
    assert_eq!(index.get("fire").unwrap().glyph, "🔥");
    assert_eq!(index.get("smile").unwrap().glyph, "😀");
    assert_eq!(index.get("happy").unwrap().glyph, "😀");

    let matches: Vec<&str> = index.search("fi", 5).iter().map(|e| e.shortcode.as_str()).collect();
    assert_eq!(matches, vec!["fire"]);
    assert_eq!(index.expand("feeling :fire: today"), "feeling 🔥 today");
}

#[test]
fn test_bundled_dataset() {
    let index = EmojiDataset::builtin().into_index();
    assert!(index.len() > 1000);
    assert_eq!(index.get("fire").unwrap().glyph, "🔥");
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_empty_query_matches_nothing() {
    let index = test_index().unwrap();
    for limit in [0, 1, 5, 100] {
        assert!(index.search("", limit).is_empty());
    }
}

#[test]
fn test_prefix_matches_precede_substring_matches() {
    let index = test_index().unwrap();
    for query in ["t", "u", "Up", "p", "+"] {
        let results = index.search(query, 20);
        let lowered = query.to_lowercase();

        let mut seen_contains_only = false;
        for entry in results {
            let starts = entry.shortcode.starts_with(&lowered);
            let contains = entry.shortcode.contains(&lowered)
                || entry.display_name.to_lowercase().contains(&lowered);
            assert!(starts || contains, "{query}: unexpected {}", entry.shortcode);

            if starts {
                assert!(!seen_contains_only, "{query}: prefix match after substring match");
            } else {
                seen_contains_only = true;
            }
        }
    }
}

#[test]
fn test_match_by_display_name() {
    let index = test_index().unwrap();
    let results = index.search("popper", 5);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].shortcode, "tada");
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_expand_is_idempotent_without_tokens() {
    let index = test_index().unwrap();
    for text in ["plain words", "time is 10:30", "a: b", "🔥 already"] {
        let once = index.expand(text).into_owned();
        assert_eq!(index.expand(&once), once);
    }
}

#[test]
fn test_expand_leaves_unknown_tokens() {
    let index = test_index().unwrap();
    assert_eq!(index.expand(":nope: :tada: :+1:"), ":nope: 🎉 👍");
    assert_eq!(index.expand("open :fire"), "open 🔥");
}

// ============================================================================
// Composer
// ============================================================================

#[test]
fn test_composer_suggest_then_complete() {
    let harness = TestHarness::start().unwrap();
    let composer = ComposerService::new(&harness.ctx);

    let draft = "party time :ta";
    let suggestions = composer.suggest(draft, draft.len());
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].token, ":tada:");

    let completion = composer.complete(draft, draft.len(), draft.len(), &suggestions[0].glyph);
    assert_eq!(completion.text, "party time 🎉");
    assert_eq!(completion.caret, completion.text.len());
}
