//! The policy engine.
//!
//! Every `(resource kind, action)` pair maps to a [`Requirement`]: a set of
//! roles of which the actor must hold at least one, plus the reason reported
//! when none is held. The table is data, so the two task rules that real
//! deployments disagree on (who may update or delete a task) are configuration
//! instead of code.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::action::{Action, ResourceKind};
use super::decision::{Decision, DenyReason};
use super::roles::{Role, RoleSet};
use crate::error::AppError;
use crate::models::User;

const BOARD_ACCESS: RoleSet = RoleSet::of(&[Role::Owner, Role::Member]);
const OWNER: RoleSet = RoleSet::of(&[Role::Owner]);
const AUTHOR: RoleSet = RoleSet::of(&[Role::Author]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Roles that satisfy the requirement. Empty means any authenticated actor.
    pub any_of: RoleSet,
    pub otherwise: DenyReason,
}

impl Requirement {
    pub const fn authenticated() -> Self {
        Self {
            any_of: RoleSet::empty(),
            otherwise: DenyReason::Unauthenticated,
        }
    }

    pub const fn any_of(roles: RoleSet, otherwise: DenyReason) -> Self {
        Self {
            any_of: roles,
            otherwise,
        }
    }

    fn is_met_by(&self, roles: RoleSet) -> bool {
        self.any_of.is_empty() || roles.intersects(self.any_of)
    }
}

/// Who may update or delete a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEditRule {
    #[default]
    Owner,
    OwnerOrMember,
    OwnerOrAssignee,
    OwnerAssigneeOrReviewer,
}

impl TaskEditRule {
    pub fn requirement(self) -> Requirement {
        match self {
            TaskEditRule::Owner => Requirement::any_of(OWNER, DenyReason::NotOwner),
            TaskEditRule::OwnerOrMember => {
                Requirement::any_of(BOARD_ACCESS, DenyReason::NotBoardMember)
            }
            TaskEditRule::OwnerOrAssignee => Requirement::any_of(
                RoleSet::of(&[Role::Owner, Role::Assignee]),
                DenyReason::NotOwner,
            ),
            TaskEditRule::OwnerAssigneeOrReviewer => Requirement::any_of(
                RoleSet::of(&[Role::Owner, Role::Assignee, Role::Reviewer]),
                DenyReason::NotOwner,
            ),
        }
    }
}

impl FromStr for TaskEditRule {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(TaskEditRule::Owner),
            "owner_or_member" => Ok(TaskEditRule::OwnerOrMember),
            "owner_or_assignee" => Ok(TaskEditRule::OwnerOrAssignee),
            "owner_assignee_or_reviewer" => Ok(TaskEditRule::OwnerAssigneeOrReviewer),
            other => Err(AppError::ConfigError(format!(
                "unknown task edit rule '{}'",
                other
            ))),
        }
    }
}

/// One row of the effective policy, as printed by the explain binary.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyRow {
    pub kind: ResourceKind,
    pub action: Action,
    #[serde(flatten)]
    pub requirement: Requirement,
}

/// Role-to-action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyTable {
    task_update: TaskEditRule,
    task_delete: TaskEditRule,
}

impl PolicyTable {
    /// Owner-only task edits.
    pub fn canonical() -> Self {
        Self::default()
    }

    pub fn with_task_rules(update: TaskEditRule, delete: TaskEditRule) -> Self {
        Self {
            task_update: update,
            task_delete: delete,
        }
    }

    pub fn requirement(&self, kind: ResourceKind, action: Action) -> Requirement {
        use Action::*;
        use ResourceKind::*;

        match (kind, action) {
            (Board, Create) => Requirement::authenticated(),
            (Board, Read | Update | Delete) => {
                Requirement::any_of(BOARD_ACCESS, DenyReason::NotBoardMember)
            }
            (Task, Create | Read) => Requirement::any_of(BOARD_ACCESS, DenyReason::NotBoardMember),
            (Task, Update) => self.task_update.requirement(),
            (Task, Delete) => self.task_delete.requirement(),
            (Comment, Create | Read) => {
                Requirement::any_of(BOARD_ACCESS, DenyReason::NotBoardMember)
            }
            (Comment, Update | Delete) => Requirement::any_of(AUTHOR, DenyReason::NotAuthor),
        }
    }

    pub fn rows(&self) -> Vec<PolicyRow> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(|kind| {
                Action::ALL.into_iter().map(move |action| PolicyRow {
                    kind,
                    action,
                    requirement: self.requirement(kind, action),
                })
            })
            .collect()
    }
}

/// Stateless evaluator over a [`PolicyTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEngine {
    table: PolicyTable,
}

impl PolicyEngine {
    pub fn new(table: PolicyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Decides whether `actor` may perform `action` on a resource of `kind`,
    /// given the roles already resolved for it.
    ///
    /// Unauthenticated actors are always denied. Superusers are always granted.
    pub fn authorize(
        &self,
        actor: Option<&User>,
        action: Action,
        kind: ResourceKind,
        roles: RoleSet,
    ) -> Decision {
        let Some(user) = actor else {
            info!("deny {} {}: no authenticated actor", action, kind);
            return Decision::Deny(DenyReason::Unauthenticated);
        };

        if user.is_superuser || roles.contains(Role::Superuser) {
            debug!("grant {} {} to user {}: superuser", action, kind, user.id);
            return Decision::Grant;
        }

        let requirement = self.table.requirement(kind, action);
        if requirement.is_met_by(roles) {
            debug!("grant {} {} to user {} with {:?}", action, kind, user.id, roles);
            Decision::Grant
        } else {
            info!(
                "deny {} {} to user {}: {:?}",
                action, kind, user.id, requirement.otherwise
            );
            Decision::Deny(requirement.otherwise)
        }
    }
}
