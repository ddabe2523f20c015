//! Feed paths - locations inside the realtime feed tree
//!
//! A path is a `/`-separated list of non-empty segments, e.g.
//! `shouts/-NxA.../replies/-NxB.../votes`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::PostKey;

/// Characters the hosted database refuses inside a key
const FORBIDDEN: &[char] = &['.', '#', '$', '[', ']'];

/// Child segment holding the vote set of a post
pub const VOTES_SEGMENT: &str = "votes";

/// Child segment holding the replies of a post
pub const REPLIES_SEGMENT: &str = "replies";

/// Location of a node in the feed tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeedPath {
    segments: Vec<String>,
}

/// Error when parsing a feed path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("empty path segment")]
    EmptySegment,

    #[error("forbidden character in path segment: {0}")]
    ForbiddenCharacter(String),
}

impl FeedPath {
    /// The tree root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated path; leading and trailing slashes are ignored
    pub fn parse(path: &str) -> Result<Self, PathParseError> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let segments = trimmed
            .split('/')
            .map(|segment| validate_segment(segment).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Append one segment
    pub fn child(&self, segment: impl AsRef<str>) -> Result<Self, PathParseError> {
        let segment = validate_segment(segment.as_ref())?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Path of a record appended under this path
    pub fn key(&self, key: &PostKey) -> Result<Self, PathParseError> {
        self.child(key.as_str())
    }

    /// Path of the vote set of the post at this path
    pub fn votes(&self) -> Self {
        self.push_trusted(VOTES_SEGMENT)
    }

    /// Path of the replies collection of the post at this path
    pub fn replies(&self) -> Self {
        self.push_trusted(REPLIES_SEGMENT)
    }

    /// Parent path, or `None` at the root
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    /// Last segment, or `None` at the root
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Segments from the root
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when `self` equals `other` or is one of its ancestors
    pub fn contains(&self, other: &FeedPath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// True when one path is an ancestor of (or equal to) the other
    pub fn overlaps(&self, other: &FeedPath) -> bool {
        self.contains(other) || other.contains(self)
    }

    fn push_trusted(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }
}

fn validate_segment(segment: &str) -> Result<&str, PathParseError> {
    if segment.is_empty() {
        return Err(PathParseError::EmptySegment);
    }
    if segment.contains(FORBIDDEN) {
        return Err(PathParseError::ForbiddenCharacter(segment.to_string()));
    }
    Ok(segment)
}

impl fmt::Display for FeedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl std::str::FromStr for FeedPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FeedPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FeedPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = FeedPath::parse("shouts/abc/replies/def").unwrap();
        assert_eq!(path.depth(), 4);
        assert_eq!(path.to_string(), "shouts/abc/replies/def");
        assert_eq!(path.last(), Some("def"));
    }

    #[test]
    fn test_parse_ignores_outer_slashes() {
        let path = FeedPath::parse("/shouts/").unwrap();
        assert_eq!(path.segments(), &["shouts".to_string()]);
        assert!(FeedPath::parse("").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_bad_segments() {
        assert_eq!(
            FeedPath::parse("shouts//abc"),
            Err(PathParseError::EmptySegment)
        );
        assert!(matches!(
            FeedPath::parse("shouts/a.b"),
            Err(PathParseError::ForbiddenCharacter(_))
        ));
        assert!(FeedPath::root().child("x[0]").is_err());
    }

    #[test]
    fn test_votes_and_replies() {
        let post = FeedPath::parse("shouts/abc").unwrap();
        assert_eq!(post.votes().to_string(), "shouts/abc/votes");
        assert_eq!(post.replies().to_string(), "shouts/abc/replies");
    }

    #[test]
    fn test_parent() {
        let path = FeedPath::parse("shouts/abc").unwrap();
        assert_eq!(path.parent().unwrap().to_string(), "shouts");
        assert!(FeedPath::root().parent().is_none());
    }

    #[test]
    fn test_contains_and_overlaps() {
        let topic = FeedPath::parse("shouts").unwrap();
        let vote = FeedPath::parse("shouts/abc/votes").unwrap();
        let other = FeedPath::parse("profiles/abc").unwrap();

        assert!(topic.contains(&vote));
        assert!(!vote.contains(&topic));
        assert!(vote.overlaps(&topic));
        assert!(!topic.overlaps(&other));
        assert!(FeedPath::root().contains(&other));
    }

    #[test]
    fn test_serde_as_string() {
        let path = FeedPath::parse("shouts/abc").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"shouts/abc\"");
        let back: FeedPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
