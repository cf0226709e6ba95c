//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use hearth_core::entities::{
    Channel, ConversationDetail, Member, MemberWithProfile, Profile, Server, ServerDetail,
};

use super::responses::{
    ChannelResponse, ConversationResponse, MemberResponse, ProfileResponse, ServerDetailResponse,
    ServerResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id.clone(),
            name: profile.name.clone(),
            image_url: profile.image_url.clone(),
            email: profile.email.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

// ============================================================================
// Server Mappers
// ============================================================================

impl From<&Server> for ServerResponse {
    fn from(server: &Server) -> Self {
        Self {
            id: server.id,
            name: server.name.clone(),
            image_url: server.image_url.clone(),
            invite_code: server.invite_code.to_string(),
            profile_id: server.profile_id,
            created_at: server.created_at,
            updated_at: server.updated_at,
        }
    }
}

impl From<Server> for ServerResponse {
    fn from(server: Server) -> Self {
        Self::from(&server)
    }
}

impl From<&ServerDetail> for ServerDetailResponse {
    fn from(detail: &ServerDetail) -> Self {
        Self {
            server: ServerResponse::from(&detail.server),
            channels: detail.channels.iter().map(ChannelResponse::from).collect(),
            members: detail.members.iter().map(MemberResponse::from).collect(),
        }
    }
}

impl From<ServerDetail> for ServerDetailResponse {
    fn from(detail: ServerDetail) -> Self {
        Self::from(&detail)
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            role: member.role,
            profile_id: member.profile_id,
            server_id: member.server_id,
            profile: None,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

impl From<&MemberWithProfile> for MemberResponse {
    fn from(value: &MemberWithProfile) -> Self {
        Self {
            profile: Some(ProfileResponse::from(&value.profile)),
            ..Self::from(&value.member)
        }
    }
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            channel_type: channel.channel_type,
            profile_id: channel.profile_id,
            server_id: channel.server_id,
            created_at: channel.created_at,
            updated_at: channel.updated_at,
        }
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

impl From<&ConversationDetail> for ConversationResponse {
    fn from(detail: &ConversationDetail) -> Self {
        Self {
            id: detail.conversation.id,
            member_one_id: detail.conversation.member_one_id,
            member_two_id: detail.conversation.member_two_id,
            member_one: MemberResponse::from(&detail.member_one),
            member_two: MemberResponse::from(&detail.member_two),
            created_at: detail.conversation.created_at,
            updated_at: detail.conversation.updated_at,
        }
    }
}

impl From<ConversationDetail> for ConversationResponse {
    fn from(detail: ConversationDetail) -> Self {
        Self::from(&detail)
    }
}
