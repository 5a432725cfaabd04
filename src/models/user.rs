use serde::{Deserialize, Serialize};

/// Identifier of a user account.
pub type UserId = i32;

/// An authenticated actor as seen by the authorization core.
///
/// Two users are the same actor when their ids match; the remaining fields are
/// informational and never take part in a permission decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_superuser: false,
        }
    }

    pub fn superuser(id: UserId, username: impl Into<String>) -> Self {
        Self {
            is_superuser: true,
            ..Self::new(id, username)
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
