use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::decision::AuthzError;

/// What the actor wants to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// Classifies a protocol verb.
    ///
    /// GET/HEAD → Read, POST → Create, PUT/PATCH → Update, DELETE → Delete.
    /// Any other verb is rejected as an invalid request rather than guessed.
    pub fn from_method(method: &Method) -> Result<Self, AuthzError> {
        match *method {
            Method::GET | Method::HEAD => Ok(Action::Read),
            Method::POST => Ok(Action::Create),
            Method::PUT | Method::PATCH => Ok(Action::Update),
            Method::DELETE => Ok(Action::Delete),
            ref other => Err(AuthzError::InvalidRequest(format!(
                "method {} cannot be authorized",
                other
            ))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The three kinds of resource the policy knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Board,
    Task,
    Comment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Board, ResourceKind::Task, ResourceKind::Comment];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ResourceKind::Board => "board",
            ResourceKind::Task => "task",
            ResourceKind::Comment => "comment",
        };
        f.write_str(name)
    }
}
