//! Ports to the external collaborators

mod store;

pub use store::{
    FeedQuery, FeedSnapshot, FeedStore, MediaRef, MediaStore, Mutation, SnapshotStream,
    StoreResult,
};
