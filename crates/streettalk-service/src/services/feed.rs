//! Feed service
//!
//! Turns the raw feed tree into ordered, rendered views for the viewer, both
//! as one-off snapshots and as a live stream.

use futures::stream::{BoxStream, StreamExt};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use streettalk_core::{build_thread, FeedQuery, FeedSort, ThreadOptions};

use crate::dto::{FeedView, PostView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current state of the feed
    #[instrument(skip(self))]
    pub async fn snapshot(&self, sort: FeedSort) -> ServiceResult<FeedView> {
        let query = self.query();
        let value = self.ctx.feed_store().get(&query.path).await?;
        Ok(feed_view(self.ctx, sort, query.apply(value)))
    }

    /// Live feed: the current state first, then a new view on every change
    ///
    /// The stream owns a clone of the context and ends when the store drops
    /// the subscription.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, sort: FeedSort) -> ServiceResult<BoxStream<'static, FeedView>> {
        let snapshots = self.ctx.feed_store().subscribe(self.query()).await?;
        let ctx = self.ctx.clone();

        debug!(topic = %ctx.topic(), "Feed subscription opened");
        Ok(snapshots
            .map(move |snapshot| feed_view(&ctx, sort, snapshot.value))
            .boxed())
    }

    /// Sort order configured for the feed
    pub fn default_sort(&self) -> FeedSort {
        self.ctx.config().feed.default_sort
    }

    fn query(&self) -> FeedQuery {
        FeedQuery::new(self.ctx.topic().clone()).limit_to_last(self.ctx.config().feed.limit)
    }
}

fn feed_view(ctx: &ServiceContext, sort: FeedSort, value: Option<Value>) -> FeedView {
    let options = ThreadOptions {
        sort,
        max_depth: ctx.config().feed.max_reply_depth,
    };
    let thread = build_thread(ctx.topic(), value.as_ref(), options);
    if thread.skipped_records > 0 {
        warn!(skipped = thread.skipped_records, "Skipped malformed feed records");
    }

    let viewer = &ctx.viewer().id;
    FeedView {
        sort,
        posts: thread
            .posts
            .iter()
            .map(|post| PostView::from_post(post, viewer, ctx.renderer()))
            .collect(),
        skipped_records: thread.skipped_records,
    }
}
