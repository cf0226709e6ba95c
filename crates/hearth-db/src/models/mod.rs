//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod conversation;
mod member;
mod profile;
mod server;

pub use channel::ChannelModel;
pub use conversation::ConversationModel;
pub use member::{MemberModel, MemberWithProfileModel};
pub use profile::ProfileModel;
pub use server::{InviteRedemptionModel, ServerModel};
