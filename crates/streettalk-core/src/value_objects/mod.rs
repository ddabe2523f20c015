//! Value objects - immutable types that represent domain concepts

mod feed_path;
mod post_key;
mod user_id;

pub use feed_path::{FeedPath, PathParseError, REPLIES_SEGMENT, VOTES_SEGMENT};
pub use post_key::{PostKey, PushKeyGenerator};
pub use user_id::UserId;
