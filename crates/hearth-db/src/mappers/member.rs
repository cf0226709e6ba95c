//! Member entity <-> model mapper

use hearth_core::entities::{Member, MemberRole, MemberWithProfile, Profile};
use hearth_core::value_objects::{MemberId, ProfileId, ServerId};

use crate::models::{MemberModel, MemberWithProfileModel};

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: MemberId::from_uuid(model.id),
            role: MemberRole::from(model.role.as_str()),
            profile_id: ProfileId::from_uuid(model.profile_id),
            server_id: ServerId::from_uuid(model.server_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MemberWithProfileModel> for MemberWithProfile {
    fn from(model: MemberWithProfileModel) -> Self {
        let profile = Profile {
            id: ProfileId::from_uuid(model.member.profile_id),
            user_id: model.profile_user_id,
            name: model.profile_name,
            image_url: model.profile_image_url,
            email: model.profile_email,
            created_at: model.profile_created_at,
            updated_at: model.profile_updated_at,
        };
        MemberWithProfile {
            member: model.member.into(),
            profile,
        }
    }
}

/// Role names allowed to manage channels, for binding as `TEXT[]`
pub fn channel_manager_roles() -> Vec<String> {
    MemberRole::CHANNEL_MANAGERS
        .iter()
        .map(|role| role.as_str().to_string())
        .collect()
}
