//! Store traits (ports) - define the interface to the realtime database and media storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The feed store models a hosted realtime
//! JSON tree: snapshot subscriptions, keyed appends, and one conflict
//! resolution primitive ([`FeedStore::atomic_mutate`]).

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{FeedPath, PostKey};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Pure function from the current value to the next one; `None` deletes the node
///
/// Implementations may invoke it several times when concurrent writes
/// conflict, so it must not have side effects.
pub type Mutation = dyn Fn(Option<Value>) -> Option<Value> + Send + Sync;

/// Stream of snapshots; the first item is the state at subscription time
pub type SnapshotStream = BoxStream<'static, FeedSnapshot>;

// ============================================================================
// Feed Store
// ============================================================================

/// State of a subtree at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub path: FeedPath,
    pub value: Option<Value>,
}

impl FeedSnapshot {
    pub fn new(path: FeedPath, value: Option<Value>) -> Self {
        Self { path, value }
    }

    /// Check if anything is stored at the path
    #[inline]
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }
}

/// Subscription target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub path: FeedPath,
    /// Keep only the last N children by key
    pub limit_to_last: Option<usize>,
}

impl FeedQuery {
    pub fn new(path: FeedPath) -> Self {
        Self {
            path,
            limit_to_last: None,
        }
    }

    pub fn limit_to_last(mut self, limit: usize) -> Self {
        self.limit_to_last = Some(limit);
        self
    }

    /// Apply the query window to the value stored at `self.path`
    pub fn apply(&self, value: Option<Value>) -> Option<Value> {
        match (self.limit_to_last, value) {
            (Some(limit), Some(Value::Object(map))) if map.len() > limit => {
                let mut entries: Vec<(String, Value)> = map.into_iter().collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                let start = entries.len() - limit;
                let window: Map<String, Value> = entries.into_iter().skip(start).collect();
                Some(Value::Object(window))
            }
            (_, value) => value,
        }
    }
}

#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Read the value at a path once
    async fn get(&self, path: &FeedPath) -> StoreResult<Option<Value>>;

    /// Subscribe to a subtree; emits the current state, then every change
    async fn subscribe(&self, query: FeedQuery) -> StoreResult<SnapshotStream>;

    /// Append a record under `topic` with a newly assigned key
    async fn append(&self, topic: &FeedPath, record: Value) -> StoreResult<PostKey>;

    /// Atomically replace the value at `path` with `mutation(current)`
    ///
    /// Returns the committed value.
    async fn atomic_mutate(&self, path: &FeedPath, mutation: &Mutation)
        -> StoreResult<Option<Value>>;
}

// ============================================================================
// Media Store
// ============================================================================

/// Retrievable reference to stored media (URL or data URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a blob and return a reference that can be rendered
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> StoreResult<MediaRef>;
}
