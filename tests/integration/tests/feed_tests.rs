//! Feed integration tests: posting, replies, votes and live updates
//!
//! Run with: cargo test -p integration-tests --test feed_tests

use std::time::Duration;

use futures::StreamExt;
use integration_tests::{author, png_bytes, test_config, TestHarness};
use serde_json::json;
use streettalk_core::entities::MAX_REPLY_DEPTH_LIMIT;
use streettalk_core::{FeedSort, PostRecord};
use streettalk_service::dto::{CreatePostRequest, MediaUpload};
use streettalk_service::{FeedService, MediaService, PostService, VoteService};

// ============================================================================
// Posting
// ============================================================================

#[tokio::test]
async fn test_post_is_stored_with_author_and_html() {
    let harness = TestHarness::start().unwrap();
    let path = harness.post("hello :smile:").await.unwrap();

    let value = harness.ctx.feed_store().get(&path).await.unwrap().unwrap();
    let record: PostRecord = serde_json::from_value(value).unwrap();
    assert_eq!(record.user_id, harness.ctx.viewer().id);
    assert_eq!(record.user, "alice");
    assert_eq!(record.content, "hello :smile:");
    assert_eq!(record.rendered_html.as_deref(), Some("<p>hello 😀</p>\n"));
}

#[tokio::test]
async fn test_post_with_attachment() {
    let harness = TestHarness::start().unwrap();
    let item = MediaService::new(&harness.ctx)
        .attach(MediaUpload::new("dot.png", "image/png", png_bytes()))
        .await
        .unwrap();

    let request = CreatePostRequest {
        content: "look".to_string(),
        media: vec![item],
    };
    PostService::new(&harness.ctx).create_post(request).await.unwrap();

    let feed = harness.feed(FeedSort::New).await.unwrap();
    assert_eq!(feed.posts[0].media.len(), 1);
    assert!(feed.posts[0].media[0].data.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_bad_attachment_yields_dismissible_notice() {
    let harness = TestHarness::start().unwrap();
    let err = MediaService::new(&harness.ctx)
        .attach(MediaUpload::new("broken.png", "image/png", b"garbage".to_vec()))
        .await
        .unwrap_err();

    assert!(err.is_media());
    let notice = err.into_notice();
    assert_eq!(notice.code, "IMAGE_DECODE_FAILURE");
    assert_eq!(notice.message, "Could not decode image: broken.png");
    assert!(notice.dismissible);

    // The draft can still be posted without the attachment
    assert!(harness.post("posted anyway").await.is_ok());
}

#[tokio::test]
async fn test_degraded_posts_are_rerendered_once_ready() {
    let degraded = TestHarness::start_degraded().unwrap();
    let path = degraded.post("**late** sanitizer").await.unwrap();

    let value = degraded.ctx.feed_store().get(&path).await.unwrap().unwrap();
    let record: PostRecord = serde_json::from_value(value).unwrap();
    assert!(!record.sanitized);

    degraded.ctx.renderer().initialize_sanitizer().await.unwrap();
    let feed = degraded.feed(FeedSort::New).await.unwrap();
    assert!(feed.posts[0].sanitized);
    assert!(feed.posts[0].html.contains("<strong>late</strong>"));
}

#[tokio::test]
async fn test_stored_html_is_never_served() {
    let harness = TestHarness::start().unwrap();
    harness.store.set(
        &harness.ctx.topic().child("forged").unwrap(),
        Some(json!({
            "userId": "mallory", "user": "mallory", "content": "just text",
            "renderedHtml": "<img src=x onerror=alert(1)>", "sanitized": true,
            "timestamp": 1
        })),
    );

    let feed = harness.feed(FeedSort::New).await.unwrap();
    assert_eq!(feed.posts[0].html, "<p>just text</p>\n");
    assert!(!feed.posts[0].html.contains("onerror"));
}

// ============================================================================
// Replies
// ============================================================================

#[tokio::test]
async fn test_nested_replies_build_a_tree() {
    let harness = TestHarness::start().unwrap();
    let root = harness.post("root").await.unwrap();
    let first = harness.reply(&root, "first").await.unwrap();
    harness.reply(&first, "nested").await.unwrap();
    harness.reply(&root, "second").await.unwrap();

    let feed = harness.feed(FeedSort::New).await.unwrap();
    let post = &feed.posts[0];
    let replies: Vec<&str> = post.replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(replies, vec!["first", "second"]);
    assert_eq!(post.replies[0].replies[0].content, "nested");
}

#[tokio::test]
async fn test_deep_threads_are_cut_at_max_depth() {
    let mut config = test_config();
    config.feed.max_reply_depth = 2;
    let harness = TestHarness::start_with_config(config).unwrap();

    let mut parent = harness.post("depth 0").await.unwrap();
    for depth in 1..=5 {
        parent = harness.reply(&parent, &format!("depth {depth}")).await.unwrap();
    }

    let feed = harness.feed(FeedSort::New).await.unwrap();
    let deepest = &feed.posts[0].replies[0].replies[0];
    assert_eq!(deepest.content, "depth 2");
    assert!(deepest.replies.is_empty());
    assert_eq!(deepest.omitted_replies, 3);
}

#[tokio::test]
async fn test_reply_depth_is_capped_even_when_configured_higher() {
    let mut config = test_config();
    config.feed.max_reply_depth = usize::MAX;
    let harness = TestHarness::start_with_config(config).unwrap();

    let mut parent = harness.post("depth 0").await.unwrap();
    for depth in 1..=100 {
        parent = harness.reply(&parent, &format!("depth {depth}")).await.unwrap();
    }

    let feed = harness.feed(FeedSort::New).await.unwrap();
    let mut deepest = &feed.posts[0];
    let mut levels = 0;
    while let Some(reply) = deepest.replies.first() {
        deepest = reply;
        levels += 1;
    }
    assert_eq!(levels, MAX_REPLY_DEPTH_LIMIT);
    assert_eq!(deepest.content, format!("depth {MAX_REPLY_DEPTH_LIMIT}"));
    assert_eq!(deepest.omitted_replies, 100 - MAX_REPLY_DEPTH_LIMIT);
}

// ============================================================================
// Votes
// ============================================================================

#[tokio::test]
async fn test_top_sort_follows_votes() {
    let harness = TestHarness::start().unwrap();
    let quiet = harness.post("quiet").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let loud = harness.post("loud").await.unwrap();

    let bob = harness.as_viewer(author("bob"));
    VoteService::new(&bob).toggle_upvote(&quiet).await.unwrap();
    harness.upvote(&quiet).await.unwrap();
    harness.upvote(&loud).await.unwrap();

    let newest = harness.feed(FeedSort::New).await.unwrap();
    assert_eq!(newest.posts[0].content, "loud");

    let top = harness.feed(FeedSort::Top).await.unwrap();
    assert_eq!(top.posts[0].content, "quiet");
    assert_eq!(top.posts[0].vote_count, 2);
    assert!(top.posts[0].has_voted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_are_not_lost() {
    let harness = TestHarness::start().unwrap();
    let path = harness.post("vote storm").await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let ctx = harness.as_viewer(author(&format!("voter{i}")));
        let path = path.clone();
        tasks.push(tokio::spawn(async move {
            VoteService::new(&ctx).toggle_upvote(&path).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let feed = harness.feed(FeedSort::Top).await.unwrap();
    assert_eq!(feed.posts[0].vote_count, 20);
    assert!(!feed.posts[0].has_voted);
}

#[tokio::test]
async fn test_reply_votes_are_independent() {
    let harness = TestHarness::start().unwrap();
    let root = harness.post("root").await.unwrap();
    let reply = harness.reply(&root, "reply").await.unwrap();
    harness.upvote(&reply).await.unwrap();

    let feed = harness.feed(FeedSort::New).await.unwrap();
    assert_eq!(feed.posts[0].vote_count, 0);
    assert_eq!(feed.posts[0].replies[0].vote_count, 1);
}

// ============================================================================
// Live Updates
// ============================================================================

#[tokio::test]
async fn test_subscription_sees_posts_replies_and_votes() {
    let harness = TestHarness::start().unwrap();
    let mut live = FeedService::new(&harness.ctx)
        .subscribe(FeedSort::New)
        .await
        .unwrap();

    assert!(live.next().await.unwrap().is_empty());

    let root = harness.post("live").await.unwrap();
    assert_eq!(live.next().await.unwrap().posts.len(), 1);

    harness.reply(&root, "live reply").await.unwrap();
    let view = live.next().await.unwrap();
    assert_eq!(view.posts[0].replies.len(), 1);

    harness.upvote(&root).await.unwrap();
    let view = live.next().await.unwrap();
    assert_eq!(view.posts[0].vote_count, 1);
}

#[tokio::test]
async fn test_malformed_records_do_not_break_the_feed() {
    let harness = TestHarness::start().unwrap();
    harness.post("fine").await.unwrap();
    harness
        .store
        .set(&harness.ctx.topic().child("broken").unwrap(), Some(json!({ "user": 7 })));

    let feed = harness.feed(FeedSort::New).await.unwrap();
    assert_eq!(feed.posts.len(), 1);
    assert_eq!(feed.skipped_records, 1);
}
