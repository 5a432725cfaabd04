//! Role resolution.
//!
//! A role is a relationship between an actor and a resource: owning the board,
//! being listed as a member, having written the comment, and so on. Resolution
//! walks the resource graph explicitly per kind (task → board, comment → task →
//! board) and collects every role that applies. Roles are not exclusive; an
//! owner can also be the assignee of a task on their own board.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::action::ResourceKind;
use super::directory::BoardDirectory;
use crate::models::{Board, BoardId, Comment, Task, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superuser,
    Owner,
    Member,
    Author,
    Assignee,
    Reviewer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Superuser,
        Role::Owner,
        Role::Member,
        Role::Author,
        Role::Assignee,
        Role::Reviewer,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of roles, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        RoleSet(0)
    }

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// True if at least one role of `other` is present.
    pub fn intersects(&self, other: RoleSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_superset(&self, other: RoleSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: RoleSet) -> Self {
        RoleSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// A single resource snapshot handed to the resolver.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Board(&'a Board),
    Task(&'a Task),
    Comment(&'a Comment),
}

impl Resource<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Board(_) => ResourceKind::Board,
            Resource::Task(_) => ResourceKind::Task,
            Resource::Comment(_) => ResourceKind::Comment,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Resource::Board(board) => board.id,
            Resource::Task(task) => task.id,
            Resource::Comment(comment) => comment.id,
        }
    }
}

fn superuser_roles(actor: &User) -> RoleSet {
    if actor.is_superuser {
        RoleSet::of(&[Role::Superuser])
    } else {
        RoleSet::empty()
    }
}

fn board_roles(actor: &User, board: &Board) -> RoleSet {
    let mut roles = superuser_roles(actor);
    if board.is_owner(actor.id) {
        roles.insert(Role::Owner);
    }
    if board.is_member(actor.id) {
        roles.insert(Role::Member);
    }
    roles
}

fn task_roles(actor: &User, task: &Task) -> RoleSet {
    // An orphaned task has no access scope left.
    let Some(board) = task.board.as_ref() else {
        return superuser_roles(actor);
    };

    let mut roles = board_roles(actor, board);
    if task.assignee == Some(actor.id) {
        roles.insert(Role::Assignee);
    }
    if task.reviewer == Some(actor.id) {
        roles.insert(Role::Reviewer);
    }
    roles
}

fn comment_roles(actor: &User, comment: &Comment) -> RoleSet {
    let mut roles = match comment.board() {
        Some(board) => board_roles(actor, board),
        None => superuser_roles(actor),
    };
    if comment.author == actor.id {
        roles.insert(Role::Author);
    }
    roles
}

/// Computes the roles `actor` holds on `resource`.
///
/// An absent actor holds no roles. Missing relationships (orphaned task, task
/// without board) simply contribute nothing.
pub fn resolve(actor: Option<&User>, resource: Resource<'_>) -> RoleSet {
    let Some(actor) = actor else {
        return RoleSet::empty();
    };

    match resource {
        Resource::Board(board) => board_roles(actor, board),
        Resource::Task(task) => task_roles(actor, task),
        Resource::Comment(comment) => comment_roles(actor, comment),
    }
}

/// Resolver with access to a board directory, for checks that only carry a
/// board id (create-time) or no resource at all (board listing).
#[derive(Debug, Clone)]
pub struct RoleResolver<D> {
    directory: D,
}

impl<D: BoardDirectory> RoleResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolves roles for one of three shapes of request:
    ///
    /// - a concrete resource: its roles, `referenced_board` is ignored;
    /// - only a referenced board id: the roles on that board, or just the
    ///   superuser role if the board does not exist;
    /// - neither: the union of roles over every board the actor can see, which
    ///   is what a board listing is authorized against.
    pub fn resolve(
        &self,
        actor: Option<&User>,
        resource: Option<Resource<'_>>,
        referenced_board: Option<BoardId>,
    ) -> RoleSet {
        let Some(user) = actor else {
            return RoleSet::empty();
        };

        match (resource, referenced_board) {
            (Some(resource), _) => resolve(actor, resource),
            (None, Some(board_id)) => match self.directory.board(board_id) {
                Some(board) => board_roles(user, board),
                None => superuser_roles(user),
            },
            (None, None) => self
                .directory
                .boards_of(user.id)
                .into_iter()
                .fold(superuser_roles(user), |roles, board| {
                    roles.union(board_roles(user, board))
                }),
        }
    }
}
