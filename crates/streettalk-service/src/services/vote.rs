//! Vote service

use tracing::{info, instrument};

use streettalk_core::{FeedPath, VoteSet};

use crate::dto::VoteOutcome;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the viewer's upvote to the post at `path`, or take it back
    ///
    /// The toggle runs as an atomic mutation on the post's vote set, so
    /// concurrent toggles from different viewers never lose each other.
    #[instrument(skip(self), fields(post = %path, voter = %self.ctx.viewer().id))]
    pub async fn toggle_upvote(&self, path: &FeedPath) -> ServiceResult<VoteOutcome> {
        PostService::new(self.ctx).require_post(path).await?;

        let voter = self.ctx.viewer().id.clone();
        let committed = self
            .ctx
            .feed_store()
            .atomic_mutate(&path.votes(), &move |current| VoteSet::toggled(current, &voter))
            .await?;

        let votes = VoteSet::from_value(committed.as_ref());
        let outcome = VoteOutcome {
            count: votes.count(),
            voted: votes.contains(&self.ctx.viewer().id),
        };

        info!(count = outcome.count, voted = outcome.voted, "Upvote toggled");
        Ok(outcome)
    }
}
