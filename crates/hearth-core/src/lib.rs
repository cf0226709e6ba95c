//! # hearth-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalized_pair, sort_members, Channel, ChannelType, Conversation, ConversationDetail,
    Identity, Member, MemberRole, MemberWithProfile, Profile, Server, ServerDetail,
    GENERAL_CHANNEL_NAME,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    ChannelRepository, ConversationRepository, InviteRedemption, MemberRepository,
    ProfileRepository, RepoResult, ServerRepository, StoreHealth,
};
pub use value_objects::{
    ChannelId, ConversationId, IdParseError, InviteCode, MalformedInviteCode, MemberId, ProfileId,
    ServerId,
};
