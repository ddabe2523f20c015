//! Integration test utilities for StreetTalk
//!
//! This crate provides helpers for running end-to-end scenarios against the
//! service layer wired to the in-memory stores.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
