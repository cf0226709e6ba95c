//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ChannelId, MemberId, ServerId};

/// Coarse category a domain error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Forbidden,
    Conflict,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Server not found: {0}")]
    ServerNotFound(ServerId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Not a member of this server")]
    MembershipNotFound,

    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Invite not found")]
    InviteNotFound,

    // =========================================================================
    // Bad Request Errors
    // =========================================================================
    #[error("Channel name \"general\" is reserved")]
    ReservedChannelName,

    #[error("The general channel cannot be modified")]
    GeneralChannelImmutable,

    #[error("Cannot start a conversation with yourself")]
    SelfConversation,

    #[error("Members belong to different servers")]
    CrossServerConversation,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not server owner")]
    NotServerOwner,

    #[error("Requires ADMIN or MODERATOR role")]
    InsufficientRole,

    #[error("Cannot target your own membership")]
    CannotTargetSelf,

    #[error("Server owner cannot leave (delete the server instead)")]
    OwnerCannotLeave,

    #[error("Not a participant in this conversation")]
    NotConversationParticipant,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Invite code already exists")]
    InviteCodeExists,

    #[error("Profile already exists")]
    ProfileExists,

    #[error("Conversation already exists")]
    ConversationExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound => "UNKNOWN_PROFILE",
            Self::ServerNotFound(_) => "UNKNOWN_SERVER",
            Self::MemberNotFound(_) | Self::MembershipNotFound => "UNKNOWN_MEMBER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::InviteNotFound => "UNKNOWN_INVITE",

            // Bad Request
            Self::ReservedChannelName => "CHANNEL_NAME_RESERVED",
            Self::GeneralChannelImmutable => "GENERAL_CHANNEL_IMMUTABLE",
            Self::SelfConversation => "SELF_CONVERSATION",
            Self::CrossServerConversation => "CROSS_SERVER_CONVERSATION",

            // Authorization
            Self::NotServerOwner => "NOT_SERVER_OWNER",
            Self::InsufficientRole => "MISSING_PERMISSIONS",
            Self::CannotTargetSelf => "CANNOT_TARGET_SELF",
            Self::OwnerCannotLeave => "OWNER_CANNOT_LEAVE",
            Self::NotConversationParticipant => "NOT_PARTICIPANT",

            // Conflict
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",
            Self::ProfileExists => "PROFILE_EXISTS",
            Self::ConversationExists => "CONVERSATION_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Category used to pick the response status
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProfileNotFound
            | Self::ServerNotFound(_)
            | Self::MemberNotFound(_)
            | Self::MembershipNotFound
            | Self::ChannelNotFound(_)
            | Self::InviteNotFound => ErrorKind::NotFound,

            Self::ReservedChannelName
            | Self::GeneralChannelImmutable
            | Self::SelfConversation
            | Self::CrossServerConversation => ErrorKind::BadRequest,

            Self::NotServerOwner
            | Self::InsufficientRole
            | Self::CannotTargetSelf
            | Self::OwnerCannotLeave
            | Self::NotConversationParticipant => ErrorKind::Forbidden,

            Self::InviteCodeExists
            | Self::ProfileExists
            | Self::ConversationExists => ErrorKind::Conflict,

            Self::DatabaseError(_) => ErrorKind::Internal,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a bad request (validation or business rule) error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::BadRequest
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
