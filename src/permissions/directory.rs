use std::collections::HashMap;

use crate::models::{Board, BoardId, UserId};

/// Read-only board lookups used by checks that only know a board id.
///
/// Implementations must answer from a snapshot already in memory; the
/// authorization core never waits on storage.
pub trait BoardDirectory {
    fn board(&self, id: BoardId) -> Option<&Board>;

    /// Boards `user` owns or is a member of.
    fn boards_of(&self, user: UserId) -> Vec<&Board>;
}

impl<D: BoardDirectory + ?Sized> BoardDirectory for &D {
    fn board(&self, id: BoardId) -> Option<&Board> {
        (**self).board(id)
    }

    fn boards_of(&self, user: UserId) -> Vec<&Board> {
        (**self).boards_of(user)
    }
}

/// In-memory directory keyed by board id.
#[derive(Debug, Clone, Default)]
pub struct BoardIndex {
    boards: HashMap<BoardId, Board>,
}

impl BoardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boards<I>(boards: I) -> Self
    where
        I: IntoIterator<Item = Board>,
    {
        Self {
            boards: boards.into_iter().map(|board| (board.id, board)).collect(),
        }
    }

    /// Adds or replaces a board snapshot.
    pub fn insert(&mut self, board: Board) -> Option<Board> {
        self.boards.insert(board.id, board)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardDirectory for BoardIndex {
    fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(&id)
    }

    fn boards_of(&self, user: UserId) -> Vec<&Board> {
        let mut boards: Vec<&Board> = self
            .boards
            .values()
            .filter(|board| board.has_access(user))
            .collect();
        boards.sort_by_key(|board| board.id);
        boards
    }
}
