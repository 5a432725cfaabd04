//! Narrowing collections to what an actor may see.
//!
//! List endpoints authorize once and then filter, instead of running a full
//! check per row. Every function here agrees with the policy table: a row is
//! kept exactly when a Read check on it would be granted.

use crate::models::{Board, Comment, Task, User};

/// Boards the actor owns or is a member of. Superusers see everything.
pub fn visible_boards<'a, I>(actor: &User, boards: I) -> Vec<&'a Board>
where
    I: IntoIterator<Item = &'a Board>,
{
    boards
        .into_iter()
        .filter(|board| actor.is_superuser || board.has_access(actor.id))
        .collect()
}

/// Tasks on boards the actor can read. Orphaned tasks are kept only for superusers.
pub fn visible_tasks<'a, I>(actor: &User, tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| {
            actor.is_superuser
                || task
                    .board
                    .as_ref()
                    .is_some_and(|board| board.has_access(actor.id))
        })
        .collect()
}

/// Tasks assigned to the actor, regardless of board membership.
pub fn assigned_to<'a, I>(actor: &User, tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.assignee == Some(actor.id))
        .collect()
}

/// Tasks the actor is reviewing, regardless of board membership.
pub fn reviewing<'a, I>(actor: &User, tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.reviewer == Some(actor.id))
        .collect()
}

/// Comments the actor can read: those whose task's board the actor belongs to.
pub fn visible_comments<'a, I>(actor: &User, comments: I) -> Vec<&'a Comment>
where
    I: IntoIterator<Item = &'a Comment>,
{
    comments
        .into_iter()
        .filter(|comment| {
            actor.is_superuser
                || comment
                    .board()
                    .is_some_and(|board| board.has_access(actor.id))
        })
        .collect()
}
