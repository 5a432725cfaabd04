pub mod board;
pub mod comment;
pub mod task;
pub mod user;

pub use board::{Board, BoardId};
pub use comment::{Comment, CommentId};
pub use task::{Task, TaskId, TaskPriority, TaskStatus};
pub use user::{User, UserId};
