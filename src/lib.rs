#![doc = "The `kanban_authz` library crate."]
#![doc = ""]
#![doc = "Authorization for a multi-tenant Kanban backend: resolving the roles a user"]
#![doc = "holds on a board, task or comment, deciding whether an action is allowed,"]
#![doc = "and the actix-web and Postgres glue the surrounding application uses to"]
#![doc = "feed requests through those checks."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod permissions;
pub mod store;

pub use crate::error::AppError;
pub use crate::permissions::{Action, Decision, DenyReason, Gate, ResourceKind};
