//! In-memory implementation of FeedStore

use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, instrument, trace, warn};

use streettalk_core::traits::{
    FeedQuery, FeedSnapshot, FeedStore, Mutation, SnapshotStream, StoreResult,
};
use streettalk_core::{DomainError, FeedPath, PostKey, PushKeyGenerator};

use super::tree::{get_at, normalize, set_at};

/// Attempts made by `atomic_mutate` before giving up
pub const DEFAULT_MAX_MUTATION_ATTEMPTS: u32 = 25;

struct TreeState {
    root: Value,
    /// Bumped on every committed write
    version: u64,
}

struct Watcher {
    query: FeedQuery,
    sender: watch::Sender<Option<Value>>,
}

/// Realtime JSON tree kept in process memory
///
/// Subscriptions are `watch` channels: a slow subscriber skips intermediate
/// states but always ends up at the latest one.
pub struct InMemoryFeedStore {
    state: RwLock<TreeState>,
    keys: PushKeyGenerator,
    watchers: DashMap<u64, Watcher>,
    next_watcher_id: AtomicU64,
    max_attempts: u32,
}

impl InMemoryFeedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_MUTATION_ATTEMPTS)
    }

    /// Create an empty store with a custom `atomic_mutate` retry budget
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            state: RwLock::new(TreeState {
                root: Value::Object(Map::new()),
                version: 0,
            }),
            keys: PushKeyGenerator::new(),
            watchers: DashMap::new(),
            next_watcher_id: AtomicU64::new(0),
            max_attempts,
        }
    }

    /// Overwrite the node at `path` without conflict checks
    ///
    /// Intended for seeding and administrative writes; `None` deletes.
    pub fn set(&self, path: &FeedPath, value: Option<Value>) {
        let mut state = self.state.write();
        self.commit(&mut state, path, value);
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.watchers.retain(|_, watcher| !watcher.sender.is_closed());
        self.watchers.len()
    }

    /// Apply a write and notify overlapping subscriptions
    ///
    /// Runs under the write lock so subscribers observe writes in commit order.
    fn commit(&self, state: &mut TreeState, path: &FeedPath, value: Option<Value>) {
        set_at(&mut state.root, path, value);
        state.version += 1;

        let mut closed = Vec::new();
        for watcher in self.watchers.iter() {
            if !watcher.query.path.overlaps(path) {
                continue;
            }
            let snapshot = watcher
                .query
                .apply(get_at(&state.root, &watcher.query.path).cloned());
            if watcher.sender.send(snapshot).is_err() {
                closed.push(*watcher.key());
            }
        }

        for id in closed {
            self.watchers.remove(&id);
            trace!(watcher_id = id, "Closed subscription pruned");
        }
    }
}

impl Default for InMemoryFeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryFeedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFeedStore")
            .field("version", &self.state.read().version)
            .field("watchers", &self.watchers.len())
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &FeedPath) -> StoreResult<Option<Value>> {
        Ok(get_at(&self.state.read().root, path).cloned())
    }

    #[instrument(skip(self), fields(path = %query.path))]
    async fn subscribe(&self, query: FeedQuery) -> StoreResult<SnapshotStream> {
        let receiver = {
            // Registering under the read lock means no write can slip in
            // between the initial snapshot and the first notification.
            let state = self.state.read();
            let initial = query.apply(get_at(&state.root, &query.path).cloned());
            let (sender, receiver) = watch::channel(initial);

            let id = self.next_watcher_id.fetch_add(1, Ordering::Relaxed);
            self.watchers.insert(
                id,
                Watcher {
                    query: query.clone(),
                    sender,
                },
            );
            debug!(watcher_id = id, "Subscription registered");
            receiver
        };

        let path = query.path;
        let snapshots = stream::unfold((receiver, true), move |(mut receiver, first)| {
            let path = path.clone();
            async move {
                if !first && receiver.changed().await.is_err() {
                    return None;
                }
                let value = receiver.borrow_and_update().clone();
                Some((FeedSnapshot::new(path, value), (receiver, false)))
            }
        });

        Ok(snapshots.boxed())
    }

    #[instrument(skip(self, record), fields(topic = %topic))]
    async fn append(&self, topic: &FeedPath, record: Value) -> StoreResult<PostKey> {
        let Some(record) = normalize(Some(record)) else {
            return Err(DomainError::ValidationError(
                "cannot append an empty record".to_string(),
            ));
        };

        let key = self.keys.generate();
        let path = topic.key(&key)?;

        let mut state = self.state.write();
        self.commit(&mut state, &path, Some(record));
        debug!(key = %key, "Record appended");

        Ok(key)
    }

    #[instrument(skip(self, mutation), fields(path = %path))]
    async fn atomic_mutate(
        &self,
        path: &FeedPath,
        mutation: &Mutation,
    ) -> StoreResult<Option<Value>> {
        for attempt in 1..=self.max_attempts {
            let (current, version) = {
                let state = self.state.read();
                (get_at(&state.root, path).cloned(), state.version)
            };

            let next = normalize(mutation(current));

            {
                let mut state = self.state.write();
                if state.version == version {
                    self.commit(&mut state, path, next.clone());
                    trace!(attempt, "Mutation committed");
                    return Ok(next);
                }
            }

            debug!(attempt, "Concurrent write detected, retrying mutation");
            tokio::task::yield_now().await;
        }

        warn!(attempts = self.max_attempts, "Mutation abandoned after repeated conflicts");
        Err(DomainError::MutationConflict {
            path: path.to_string(),
            attempts: self.max_attempts,
        })
    }
}
