//! Server entity - a named community that owns members and channels

use chrono::{DateTime, Utc};

use super::{Channel, MemberWithProfile};
use crate::value_objects::{InviteCode, ProfileId, ServerId};

/// Server entity
///
/// Ownership (`profile_id`) is independent of member roles: the owner starts
/// out as an ADMIN member, but only this field grants owner-only operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    pub image_url: String,
    pub invite_code: InviteCode,
    /// Owning profile
    pub profile_id: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Create a new server with a freshly minted invite code
    pub fn new(id: ServerId, name: String, image_url: String, owner: ProfileId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            image_url,
            invite_code: InviteCode::generate(),
            profile_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a profile owns this server
    #[inline]
    pub fn is_owner(&self, profile_id: ProfileId) -> bool {
        self.profile_id == profile_id
    }
}

/// A server expanded with its channels and members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDetail {
    pub server: Server,
    pub channels: Vec<Channel>,
    pub members: Vec<MemberWithProfile>,
}

impl ServerDetail {
    /// Membership of the given profile, if any
    pub fn member_for(&self, profile_id: ProfileId) -> Option<&MemberWithProfile> {
        self.members
            .iter()
            .find(|m| m.member.profile_id == profile_id)
    }

    pub fn general_channel(&self) -> Option<&Channel> {
        self.channels.iter().find(|c| c.is_general())
    }
}
