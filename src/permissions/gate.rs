use actix_web::http::Method;
use log::{debug, info, warn};

use super::action::{Action, ResourceKind};
use super::decision::{AuthzError, Decision, DenyReason};
use super::directory::BoardDirectory;
use super::policy::{PolicyEngine, PolicyTable};
use super::roles::{Resource, RoleResolver};
use crate::models::{BoardId, Task, User};

/// Role resolver and policy engine bundled for the web layer.
///
/// Each method covers one request shape. Create flows check authentication
/// first, then that the referenced board or task exists, and only then the
/// actor's roles, so a missing parent is reported as `ResourceMissing` rather
/// than a role denial.
#[derive(Debug, Clone)]
pub struct Gate<D> {
    resolver: RoleResolver<D>,
    engine: PolicyEngine,
}

impl<D: BoardDirectory> Gate<D> {
    pub fn new(directory: D, table: PolicyTable) -> Self {
        Self {
            resolver: RoleResolver::new(directory),
            engine: PolicyEngine::new(table),
        }
    }

    pub fn resolver(&self) -> &RoleResolver<D> {
        &self.resolver
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// Read, update or delete of an existing resource.
    ///
    /// Creation always goes through one of the `check_*_create` methods, so
    /// `Action::Create` here is an invalid request.
    pub fn check(
        &self,
        actor: Option<&User>,
        action: Action,
        resource: Resource<'_>,
    ) -> Result<Decision, AuthzError> {
        if action == Action::Create {
            warn!("create check requested against existing {} {}", resource.kind(), resource.id());
            return Err(AuthzError::InvalidRequest(format!(
                "cannot create an existing {}",
                resource.kind()
            )));
        }

        let roles = self.resolver.resolve(actor, Some(resource), None);
        debug!("{} {} resolved to {:?}", resource.kind(), resource.id(), roles);
        Ok(self.engine.authorize(actor, action, resource.kind(), roles))
    }

    /// Like [`Gate::check`], with the action taken from the request verb.
    pub fn check_method(
        &self,
        actor: Option<&User>,
        method: &Method,
        resource: Resource<'_>,
    ) -> Result<Decision, AuthzError> {
        self.check(actor, Action::from_method(method)?, resource)
    }

    /// Listing boards requires owning or being a member of at least one.
    pub fn check_board_list(&self, actor: Option<&User>) -> Decision {
        // No single board yet, so use the union of roles over the actor's boards
        let roles = self.resolver.resolve(actor, None, None);
        self.engine
            .authorize(actor, Action::Read, ResourceKind::Board, roles)
    }

    pub fn check_board_create(&self, actor: Option<&User>) -> Decision {
        self.engine
            .authorize(actor, Action::Create, ResourceKind::Board, Default::default())
    }

    /// Creating a task on `board_id`. A request without a board is malformed.
    pub fn check_task_create(
        &self,
        actor: Option<&User>,
        board_id: Option<BoardId>,
    ) -> Result<Decision, AuthzError> {
        // Anonymous callers learn nothing about the board, not even if it exists
        if actor.is_none() {
            info!("deny create task: no authenticated actor");
            return Ok(Decision::Deny(DenyReason::Unauthenticated));
        }
        let Some(board_id) = board_id else {
            return Err(AuthzError::InvalidRequest("board is required".into()));
        };
        // Missing board is a 404, checked before membership so it is not
        // reported as a role denial
        if self.resolver.directory().board(board_id).is_none() {
            info!("deny create task: board {} not found", board_id);
            return Ok(Decision::Deny(DenyReason::ResourceMissing));
        }

        // Roles come from the referenced board, the task does not exist yet
        let roles = self.resolver.resolve(actor, None, Some(board_id));
        Ok(self
            .engine
            .authorize(actor, Action::Create, ResourceKind::Task, roles))
    }

    /// Creating a comment on `task`; `None` means the task was not found.
    ///
    /// Membership is taken from the task's board, so an orphaned task only
    /// accepts comments from a superuser.
    pub fn check_comment_create(&self, actor: Option<&User>, task: Option<&Task>) -> Decision {
        if actor.is_none() {
            return Decision::Deny(DenyReason::Unauthenticated);
        }
        let Some(task) = task else {
            info!("deny create comment: task not found");
            return Decision::Deny(DenyReason::ResourceMissing);
        };

        // Task roles include the board's owner and members
        let roles = self.resolver.resolve(actor, Some(Resource::Task(task)), None);
        self.engine
            .authorize(actor, Action::Create, ResourceKind::Comment, roles)
    }

    /// Reading the comments of `task`, with the same missing-parent handling as
    /// comment creation.
    pub fn check_comment_list(&self, actor: Option<&User>, task: Option<&Task>) -> Decision {
        if actor.is_none() {
            return Decision::Deny(DenyReason::Unauthenticated);
        }
        let Some(task) = task else {
            info!("deny list comments: task not found");
            return Decision::Deny(DenyReason::ResourceMissing);
        };

        let roles = self.resolver.resolve(actor, Some(Resource::Task(task)), None);
        self.engine
            .authorize(actor, Action::Read, ResourceKind::Comment, roles)
    }
}
