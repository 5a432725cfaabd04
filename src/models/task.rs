use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::board::Board;
use super::user::UserId;

/// Identifier of a task.
pub type TaskId = i32;

/// Priority of a task. Stored and serialized in lowercase.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Workflow column of a task.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet (`to-do`).
    #[default]
    ToDo,
    InProgress,
    Review,
    Done,
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown task priority '{}'", other)),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-do" => Ok(TaskStatus::ToDo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

/// Snapshot of a task together with the board it belongs to.
///
/// `board` is `None` when the task has been orphaned by deleting its board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub board: Option<Board>,
    pub assignee: Option<UserId>,
    pub reviewer: Option<UserId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates a task on `board` with default status and priority.
    pub fn new(id: TaskId, title: impl Into<String>, board: Option<Board>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            board,
            assignee: None,
            reviewer: None,
            due_date: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
        }
    }

    pub fn assigned_to(mut self, user: UserId) -> Self {
        self.assignee = Some(user);
        self
    }

    pub fn reviewed_by(mut self, user: UserId) -> Self {
        self.reviewer = Some(user);
        self
    }

    pub fn is_orphaned(&self) -> bool {
        self.board.is_none()
    }
}
