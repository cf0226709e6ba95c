//! Business logic services
//!
//! Every service borrows the shared [`ServiceContext`] and takes the acting
//! profile as an explicit argument.

pub mod channel;
pub mod context;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod invite;
pub mod member;
pub mod permission;
pub mod server;

// Re-export all services for convenience
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityService;
pub use invite::{InviteOutcome, InviteService};
pub use member::MemberService;
pub use permission::PermissionService;
pub use server::ServerService;
