use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Why a permission check was denied.
///
/// Every reason has a fixed user-facing message; the role set that produced the
/// denial is never part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    NotBoardMember,
    NotOwner,
    NotAuthor,
    /// The resource, or the board/task a create request references, does not exist.
    ResourceMissing,
}

impl DenyReason {
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "Authentication credentials were not provided.",
            DenyReason::NotBoardMember => {
                "User must be a member of the board to perform this action."
            }
            DenyReason::NotOwner => "Only the board owner can perform this action.",
            DenyReason::NotAuthor => "Only the author of the comment can perform this action.",
            DenyReason::ResourceMissing => "The requested resource does not exist.",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "lowercase")]
pub enum Decision {
    Grant,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Grant)
    }

    /// Maps the decision onto the web layer's error type.
    ///
    /// `ResourceMissing` becomes a 404, every other denial a 403 carrying the
    /// reason's message.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Grant => Ok(()),
            Decision::Deny(reason) => Err(reason.into()),
        }
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> AppError {
        match reason {
            DenyReason::ResourceMissing => AppError::NotFound(reason.message().to_string()),
            _ => AppError::Forbidden(reason.message().to_string()),
        }
    }
}

/// Faults in the request itself, as opposed to policy denials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    InvalidRequest(String),
}

impl fmt::Display for AuthzError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthzError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AuthzError {}

impl From<AuthzError> for AppError {
    fn from(error: AuthzError) -> AppError {
        match error {
            AuthzError::InvalidRequest(msg) => AppError::BadRequest(msg),
        }
    }
}
