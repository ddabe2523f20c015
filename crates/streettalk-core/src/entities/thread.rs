//! Thread building - turns a feed snapshot into a tree of [`Post`]s
//!
//! The snapshot is walked breadth-first with an explicit queue, so arbitrarily
//! deep reply chains cannot exhaust the stack while reading. Replies nested
//! deeper than [`ThreadOptions::max_depth`] are not materialized; their count
//! is kept in [`Post::omitted_replies`]. The built tree is walked recursively
//! afterwards (mapping, drop), so its depth never exceeds
//! [`MAX_REPLY_DEPTH_LIMIT`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use super::post::{Post, PostRecord};
use super::vote::VoteSet;
use crate::value_objects::{FeedPath, PostKey, REPLIES_SEGMENT, VOTES_SEGMENT};

/// Default nesting cutoff for reply trees
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Hard ceiling on [`ThreadOptions::max_depth`]
pub const MAX_REPLY_DEPTH_LIMIT: usize = 64;

/// Ordering of top-level posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest first
    #[default]
    New,
    /// Most upvoted first
    Top,
}

impl FromStr for FeedSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            other => Err(format!("unknown feed sort: {other}")),
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::Top => f.write_str("top"),
        }
    }
}

/// Options for [`build_thread`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadOptions {
    pub sort: FeedSort,
    /// Deepest reply level that is materialized (top-level posts are depth 0).
    /// Values above [`MAX_REPLY_DEPTH_LIMIT`] are clamped.
    pub max_depth: usize,
}

impl Default for ThreadOptions {
    fn default() -> Self {
        Self {
            sort: FeedSort::New,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of [`build_thread`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    pub posts: Vec<Post>,
    /// Records that could not be read as posts
    pub skipped_records: usize,
}

struct Node {
    post: Post,
    parent: Option<usize>,
}

/// Build the post tree stored under `root`
///
/// `snapshot` is the JSON value at `root`: an object of push keys to post
/// records. Top-level posts are ordered by `options.sort` (stable); replies
/// keep key order, which is creation order for push keys.
pub fn build_thread(root: &FeedPath, snapshot: Option<&Value>, options: ThreadOptions) -> Thread {
    let max_depth = options.max_depth.min(MAX_REPLY_DEPTH_LIMIT);
    let mut nodes: Vec<Node> = Vec::new();
    let mut skipped_records = 0;
    let mut queue: VecDeque<(Option<usize>, FeedPath, usize, &Map<String, Value>)> =
        VecDeque::new();

    if let Some(Value::Object(children)) = snapshot {
        queue.push_back((None, root.clone(), 0, children));
    }

    while let Some((parent, collection, depth, children)) = queue.pop_front() {
        for (key, value) in children {
            let Ok(path) = collection.child(key) else {
                skipped_records += 1;
                continue;
            };
            let Ok(record) = PostRecord::deserialize(value) else {
                skipped_records += 1;
                continue;
            };

            let votes = VoteSet::from_value(value.get(VOTES_SEGMENT));
            let mut post = Post::from_record(PostKey::new(key.as_str()), path, depth, record, votes);
            let index = nodes.len();

            if let Some(Value::Object(replies)) = value.get(REPLIES_SEGMENT) {
                if !replies.is_empty() {
                    if depth < max_depth {
                        queue.push_back((Some(index), post.path.replies(), depth + 1, replies));
                    } else {
                        post.omitted_replies = count_records(replies);
                    }
                }
            }

            nodes.push(Node { post, parent });
        }
    }

    // Breadth-first order guarantees every parent index is smaller than its
    // children, so a reverse sweep attaches each finished subtree exactly once.
    let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
    let mut roots = Vec::new();
    for index in (0..slots.len()).rev() {
        let Some(Node { mut post, parent }) = slots[index].take() else {
            continue;
        };
        post.replies.reverse();
        match parent.and_then(|p| slots[p].as_mut()) {
            Some(parent_node) => parent_node.post.replies.push(post),
            None => roots.push(post),
        }
    }
    roots.reverse();

    match options.sort {
        FeedSort::New => roots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        FeedSort::Top => roots.sort_by(|a, b| b.vote_count().cmp(&a.vote_count())),
    }

    Thread {
        posts: roots,
        skipped_records,
    }
}

/// Count every record in a replies collection, at all depths
fn count_records(children: &Map<String, Value>) -> usize {
    let mut total = 0;
    let mut stack = vec![children];
    while let Some(map) = stack.pop() {
        total += map.len();
        for value in map.values() {
            if let Some(Value::Object(replies)) = value.get(REPLIES_SEGMENT) {
                stack.push(replies);
            }
        }
    }
    total
}
