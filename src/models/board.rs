use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::user::UserId;

/// Identifier of a board.
pub type BoardId = i32;

/// Snapshot of a Kanban board and its access list.
///
/// The owner is fixed at creation. `members` is the explicit member list and
/// does not need to contain the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub owner: UserId,
    #[serde(default)]
    pub members: HashSet<UserId>,
    pub created_date: Option<NaiveDate>,
}

impl Board {
    pub fn new(id: BoardId, title: impl Into<String>, owner: UserId) -> Self {
        Self {
            id,
            title: title.into(),
            owner,
            members: HashSet::new(),
            created_date: None,
        }
    }

    /// Builder-style helper for adding members to a snapshot.
    pub fn with_members<I>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        self.members.extend(members);
        self
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner == user
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Owner or explicit member.
    pub fn has_access(&self, user: UserId) -> bool {
        self.is_owner(user) || self.is_member(user)
    }
}
