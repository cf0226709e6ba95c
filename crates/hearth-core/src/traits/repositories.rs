//! Repository traits (ports) - define the interface for data access
//!
//! Every mutating method that is subject to authorization takes the acting
//! profile and applies the ownership/role predicate in the same atomic
//! statement as the write. A rejected predicate is reported as "nothing
//! matched" (`None`/`false`), never as a partial write. Implementations must
//! not split these methods into a read followed by a write.

use async_trait::async_trait;

use crate::entities::{
    Channel, ChannelType, Conversation, Member, MemberRole, MemberWithProfile, Profile, Server,
};
use crate::error::DomainError;
use crate::value_objects::{ChannelId, InviteCode, MemberId, ProfileId, ServerId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_by_id(&self, id: ProfileId) -> RepoResult<Option<Profile>>;

    /// Find profile by external (identity provider) user id
    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Profile>>;

    /// Insert the profile unless one already exists for its `user_id`.
    /// Returns the stored row in both cases.
    async fn create_or_get(&self, profile: &Profile) -> RepoResult<Profile>;
}

// ============================================================================
// Server Repository
// ============================================================================

/// Result of redeeming an invite code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRedemption {
    pub server: Server,
    /// `false` when the profile was already a member and nothing was inserted
    pub joined: bool,
}

#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find server by ID
    async fn find_by_id(&self, id: ServerId) -> RepoResult<Option<Server>>;

    /// Oldest server the profile is a member of
    async fn find_first_for_profile(&self, profile_id: ProfileId) -> RepoResult<Option<Server>>;

    /// All servers the profile is a member of, oldest first
    async fn find_for_profile(&self, profile_id: ProfileId) -> RepoResult<Vec<Server>>;

    /// Server with this invite code that already counts the profile as a member
    async fn find_by_invite_for_member(
        &self,
        invite_code: &InviteCode,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Server>>;

    /// Persist a server with its general channel and founding membership in
    /// one transaction
    async fn create_with_defaults(
        &self,
        server: &Server,
        general: &Channel,
        owner: &Member,
    ) -> RepoResult<()>;

    /// Update name and image if `owner` owns the server
    async fn update_as_owner(
        &self,
        id: ServerId,
        owner: ProfileId,
        name: &str,
        image_url: &str,
    ) -> RepoResult<Option<Server>>;

    /// Replace the invite code if `owner` owns the server
    async fn rotate_invite_code(
        &self,
        id: ServerId,
        owner: ProfileId,
        invite_code: &InviteCode,
    ) -> RepoResult<Option<Server>>;

    /// Delete the server (cascading members and channels) if `owner` owns it.
    /// Returns the deleted row.
    async fn delete_as_owner(&self, id: ServerId, owner: ProfileId) -> RepoResult<Option<Server>>;

    /// Add a GUEST membership for the profile to the server matched by the
    /// invite code. Idempotent per (server, profile). `None` when no server
    /// carries the code.
    async fn join_by_invite(
        &self,
        invite_code: &InviteCode,
        member_id: MemberId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<InviteRedemption>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Find member by ID with its profile
    async fn find_with_profile(&self, id: MemberId) -> RepoResult<Option<MemberWithProfile>>;

    /// Find the membership of a profile in a server
    async fn find_by_server_and_profile(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Member>>;

    /// Find the membership of a profile in a server with its profile
    async fn find_with_profile_by_server_and_profile(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<MemberWithProfile>>;

    /// All members of a server with profiles, highest role first
    async fn find_by_server(&self, server_id: ServerId) -> RepoResult<Vec<MemberWithProfile>>;

    /// Change a member's role if `owner` owns the server and the target is
    /// not the owner's own membership
    async fn update_role_as_owner(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        owner: ProfileId,
        role: MemberRole,
    ) -> RepoResult<bool>;

    /// Remove a member if `owner` owns the server and the target is not the
    /// owner's own membership
    async fn delete_as_owner(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        owner: ProfileId,
    ) -> RepoResult<bool>;

    /// Remove the profile's own membership unless it owns the server,
    /// returning the server row read by the same statement
    async fn delete_own_membership(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Server>>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: ChannelId) -> RepoResult<Option<Channel>>;

    /// List channels in a server, general first then by creation
    async fn find_by_server(&self, server_id: ServerId) -> RepoResult<Vec<Channel>>;

    /// Insert the channel if its creator (`channel.profile_id`) is an ADMIN or
    /// MODERATOR of `channel.server_id`
    async fn create_as_manager(&self, channel: &Channel) -> RepoResult<bool>;

    /// Rename/retype a channel other than general if `manager` is an ADMIN or
    /// MODERATOR of the server
    async fn update_as_manager(
        &self,
        server_id: ServerId,
        channel_id: ChannelId,
        manager: ProfileId,
        name: &str,
        channel_type: ChannelType,
    ) -> RepoResult<Option<Channel>>;

    /// Delete a channel other than general if `manager` is an ADMIN or
    /// MODERATOR of the server
    async fn delete_as_manager(
        &self,
        server_id: ServerId,
        channel_id: ChannelId,
        manager: ProfileId,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find the conversation stored as (member_one, member_two) exactly
    async fn find_ordered(
        &self,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> RepoResult<Option<Conversation>>;

    /// Insert unless the unordered pair already has a conversation.
    /// Returns the stored row in both cases.
    async fn create_or_get(&self, conversation: &Conversation) -> RepoResult<Conversation>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}
