//! Author entity - the identity attached to posts and votes

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Name shown for users who never picked one
pub const DEFAULT_DISPLAY_NAME: &str = "Stranger";

/// Author / viewer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    /// Avatar reference (URL or data URL); empty when unset
    pub avatar: String,
}

impl Author {
    pub fn new(id: UserId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            name: if name.trim().is_empty() {
                DEFAULT_DISPLAY_NAME.to_string()
            } else {
                name
            },
            avatar: avatar.into(),
        }
    }

    /// A freshly generated anonymous identity
    pub fn anonymous() -> Self {
        Self::new(UserId::generate(), DEFAULT_DISPLAY_NAME, "")
    }

    #[inline]
    pub fn has_avatar(&self) -> bool {
        !self.avatar.is_empty()
    }
}
