//! Member entity - a profile's role-scoped participation in one server

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Profile;
use crate::value_objects::{MemberId, ProfileId, ServerId};

/// Member role. Ordered ADMIN > MODERATOR > GUEST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Moderator,
    #[default]
    Guest,
}

impl MemberRole {
    /// Roles allowed to manage channels
    pub const CHANNEL_MANAGERS: [MemberRole; 2] = [MemberRole::Admin, MemberRole::Moderator];

    /// Storage / wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Guest => "GUEST",
        }
    }

    #[inline]
    const fn rank(self) -> u8 {
        match self {
            Self::Admin => 2,
            Self::Moderator => 1,
            Self::Guest => 0,
        }
    }

    /// Check if this role may create, edit, or delete channels
    #[inline]
    pub fn can_manage_channels(self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }
}

impl PartialOrd for MemberRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MemberRole {
    fn from(value: &str) -> Self {
        match value {
            "ADMIN" => Self::Admin,
            "MODERATOR" => Self::Moderator,
            _ => Self::Guest, // Least privilege for unknown values
        }
    }
}

/// Member entity (junction between Profile and Server)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub role: MemberRole,
    pub profile_id: ProfileId,
    pub server_id: ServerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: MemberId, profile_id: ProfileId, server_id: ServerId, role: MemberRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            role,
            profile_id,
            server_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The founding membership created alongside a server
    pub fn owner(id: MemberId, profile_id: ProfileId, server_id: ServerId) -> Self {
        Self::new(id, profile_id, server_id, MemberRole::Admin)
    }
}

/// A member together with its profile, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithProfile {
    pub member: Member,
    pub profile: Profile,
}

/// Order members for display: highest role first, then by join time
pub fn sort_members(members: &mut [MemberWithProfile]) {
    members.sort_by(|a, b| {
        b.member
            .role
            .cmp(&a.member.role)
            .then(a.member.created_at.cmp(&b.member.created_at))
    });
}
