//! Authorization for boards, tasks and comments.
//!
//! A check runs in two steps. [`RoleResolver`] works out which relationships
//! the actor has with the resource ([`RoleSet`]), then [`PolicyEngine`] looks
//! up what the requested [`Action`] needs and returns a [`Decision`]. Both
//! steps are pure and synchronous. [`Gate`] wires them together for the request
//! shapes the web layer deals with.

pub mod action;
pub mod decision;
pub mod directory;
pub mod filters;
pub mod gate;
pub mod policy;
pub mod roles;

pub use action::{Action, ResourceKind};
pub use decision::{AuthzError, Decision, DenyReason};
pub use directory::{BoardDirectory, BoardIndex};
pub use gate::Gate;
pub use policy::{PolicyEngine, PolicyRow, PolicyTable, Requirement, TaskEditRule};
pub use roles::{resolve, Resource, Role, RoleResolver, RoleSet};
