use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::task::Task;
use super::user::UserId;

/// Identifier of a comment.
pub type CommentId = i32;

/// Snapshot of a comment with its task (and, through the task, its board).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub task: Option<Task>,
    pub author: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: CommentId, task: Option<Task>, author: UserId, content: impl Into<String>) -> Self {
        Self {
            id,
            task,
            author,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Board reached through `comment.task.board`; `None` if either hop is missing.
    pub fn board(&self) -> Option<&Board> {
        self.task.as_ref().and_then(|task| task.board.as_ref())
    }
}
