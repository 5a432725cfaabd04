//! Postgres snapshot loading.
//!
//! The permission core is synchronous and works on snapshots. This module is
//! the async side: it reads boards, tasks and comments with their
//! relationships in one go so a request is authorized against a single
//! consistent view. Table layout is owned by the application's migrations;
//! the queries expect `boards`, `board_members`, `tasks` and `comments`.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{
    Board, BoardId, Comment, CommentId, Task, TaskId, TaskPriority, TaskStatus, User,
};
use crate::permissions::BoardIndex;

#[derive(Debug, Clone, FromRow)]
pub struct BoardRow {
    pub id: i32,
    pub title: String,
    pub owner_id: i32,
    pub created_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub board_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub board_id: Option<i32>,
    pub assignee_id: Option<i32>,
    pub reviewer_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i32,
    pub task_id: Option<i32>,
    pub author_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Joins board rows with their member rows. Members of unknown boards are dropped.
pub fn assemble_boards(rows: Vec<BoardRow>, members: Vec<MemberRow>) -> Vec<Board> {
    let mut by_board: HashMap<i32, Vec<i32>> = HashMap::new();
    for member in members {
        by_board.entry(member.board_id).or_default().push(member.user_id);
    }

    rows.into_iter()
        .map(|row| {
            let mut board = Board::new(row.id, row.title, row.owner_id)
                .with_members(by_board.remove(&row.id).unwrap_or_default());
            board.created_date = row.created_date;
            board
        })
        .collect()
}

impl TaskRow {
    /// Builds the snapshot; `board` must be the board `board_id` points at, or
    /// `None` if it no longer exists.
    pub fn into_task(self, board: Option<Board>) -> Result<Task, AppError> {
        let priority = self
            .priority
            .parse::<TaskPriority>()
            .map_err(|e: String| AppError::DatabaseError(format!("task {}: {}", self.id, e)))?;
        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(|e: String| AppError::DatabaseError(format!("task {}: {}", self.id, e)))?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            board,
            assignee: self.assignee_id,
            reviewer: self.reviewer_id,
            due_date: self.due_date,
            priority,
            status,
        })
    }
}

impl CommentRow {
    pub fn into_comment(self, task: Option<Task>) -> Comment {
        Comment {
            id: self.id,
            task,
            author: self.author_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

async fn fetch_members(pool: &PgPool, board_ids: &[i32]) -> Result<Vec<MemberRow>, AppError> {
    if board_ids.is_empty() {
        return Ok(Vec::new());
    }

    let members = sqlx::query_as::<_, MemberRow>(
        "SELECT board_id, user_id FROM board_members WHERE board_id = ANY($1)",
    )
    .bind(board_ids)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

/// Loads one board with its members.
pub async fn load_board(pool: &PgPool, id: BoardId) -> Result<Option<Board>, AppError> {
    let row = sqlx::query_as::<_, BoardRow>(
        "SELECT id, title, owner_id, created_date FROM boards WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    // Members live in their own table, fetched in a second query
    let members = fetch_members(pool, &[row.id]).await?;
    Ok(assemble_boards(vec![row], members).pop())
}

/// Builds the directory for one request: every board `user` owns or belongs
/// to, plus `referenced` if the request names a board (so a create request
/// against a foreign board resolves as forbidden, not missing).
pub async fn load_board_index(
    pool: &PgPool,
    user: &User,
    referenced: Option<BoardId>,
) -> Result<BoardIndex, AppError> {
    // Owned, joined, or explicitly referenced by the request
    let rows = sqlx::query_as::<_, BoardRow>(
        "SELECT DISTINCT b.id, b.title, b.owner_id, b.created_date
         FROM boards b
         LEFT JOIN board_members m ON m.board_id = b.id
         WHERE b.owner_id = $1 OR m.user_id = $1 OR b.id = $2
         ORDER BY b.id",
    )
    .bind(user.id)
    .bind(referenced)
    .fetch_all(pool)
    .await?;

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let members = fetch_members(pool, &ids).await?;
    debug!("loaded {} boards for user {}", ids.len(), user.id);

    Ok(BoardIndex::from_boards(assemble_boards(rows, members)))
}

/// Loads a task together with its board, if the board still exists.
pub async fn load_task(pool: &PgPool, id: TaskId) -> Result<Option<Task>, AppError> {
    let row = sqlx::query_as::<_, TaskRow>(
        "SELECT id, title, description, board_id, assignee_id, reviewer_id, due_date, priority, status
         FROM tasks WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    // A dangling board_id loads as an orphaned task, not an error
    let board = match row.board_id {
        Some(board_id) => load_board(pool, board_id).await?,
        None => None,
    };
    row.into_task(board).map(Some)
}

/// Loads a comment with its task and the task's board.
pub async fn load_comment(pool: &PgPool, id: CommentId) -> Result<Option<Comment>, AppError> {
    let row = sqlx::query_as::<_, CommentRow>(
        "SELECT id, task_id, author_id, content, created_at FROM comments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    // Same for a comment whose task was deleted
    let task = match row.task_id {
        Some(task_id) => load_task(pool, task_id).await?,
        None => None,
    };
    Ok(Some(row.into_comment(task)))
}
