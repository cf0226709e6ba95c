//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    ChannelRepository, ConversationRepository, InviteRedemption, MemberRepository,
    ProfileRepository, RepoResult, ServerRepository, StoreHealth,
};
