//! Axum extractors for request handling
//!
//! Custom extractors for authentication, typed path ids and validated bodies.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, CurrentProfile, OptionalAuthUser};
pub use path::{InviteCodePath, ParsedPath, ServerChannelPath, ServerIdPath, ServerMemberPath};
pub use validated::ValidatedJson;
