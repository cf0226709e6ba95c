//! Domain entities - core business objects

pub mod channel;
mod conversation;
mod member;
mod profile;
mod server;

pub use channel::{Channel, ChannelType, GENERAL_CHANNEL_NAME};
pub use conversation::{normalized_pair, Conversation, ConversationDetail};
pub use member::{sort_members, Member, MemberRole, MemberWithProfile};
pub use profile::{Identity, Profile, ANONYMOUS_NAME};
pub use server::{Server, ServerDetail};
