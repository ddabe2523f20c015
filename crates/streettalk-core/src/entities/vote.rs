//! Vote set - the upvotes on a post
//!
//! Stored in the feed tree as `{ "<userId>": true, ... }`, so a voter can
//! appear at most once.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::value_objects::UserId;

/// Set of voters on a post
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoteSet {
    voters: BTreeSet<UserId>,
}

impl VoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a vote set from its stored JSON form
    ///
    /// Entries whose value is `false` or `null` are not counted.
    pub fn from_value(value: Option<&Value>) -> Self {
        let voters = match value {
            Some(Value::Object(map)) => map
                .iter()
                .filter(|(_, v)| !matches!(v, Value::Bool(false) | Value::Null))
                .map(|(k, _)| UserId::new(k.as_str()))
                .collect(),
            _ => BTreeSet::new(),
        };
        Self { voters }
    }

    /// Stored JSON form; `None` when nobody voted
    pub fn to_value(&self) -> Option<Value> {
        if self.voters.is_empty() {
            return None;
        }
        let map: Map<String, Value> = self
            .voters
            .iter()
            .map(|voter| (voter.as_str().to_string(), Value::Bool(true)))
            .collect();
        Some(Value::Object(map))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.voters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn contains(&self, voter: &UserId) -> bool {
        self.voters.contains(voter)
    }

    /// Add the voter if absent, remove it if present; returns whether the
    /// voter is in the set afterwards
    pub fn toggle(&mut self, voter: &UserId) -> bool {
        if self.voters.remove(voter) {
            false
        } else {
            self.voters.insert(voter.clone());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.voters.iter()
    }

    /// Pure toggle over the stored form, suitable as an atomic mutation
    ///
    /// Safe to invoke repeatedly: the result depends only on `current`.
    pub fn toggled(current: Option<Value>, voter: &UserId) -> Option<Value> {
        let mut set = Self::from_value(current.as_ref());
        set.toggle(voter);
        set.to_value()
    }
}

impl FromIterator<UserId> for VoteSet {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        Self {
            voters: iter.into_iter().collect(),
        }
    }
}
