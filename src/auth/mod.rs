//! Web-facing glue between the request pipeline and the permission core.
//!
//! Authentication itself (tokens, sessions) happens upstream; these pieces only
//! consume the [`crate::models::User`] it leaves in the request extensions.

pub mod extractors;
pub mod middleware;

pub use extractors::Identity;
pub use middleware::RequireIdentity;
