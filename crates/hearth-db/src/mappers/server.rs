//! Server entity <-> model mapper

use hearth_core::entities::Server;
use hearth_core::traits::InviteRedemption;
use hearth_core::value_objects::{InviteCode, ProfileId, ServerId};

use crate::models::{InviteRedemptionModel, ServerModel};

impl From<ServerModel> for Server {
    fn from(model: ServerModel) -> Self {
        Server {
            id: ServerId::from_uuid(model.id),
            name: model.name,
            image_url: model.image_url,
            invite_code: InviteCode::from_stored(model.invite_code),
            profile_id: ProfileId::from_uuid(model.profile_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<InviteRedemptionModel> for InviteRedemption {
    fn from(model: InviteRedemptionModel) -> Self {
        InviteRedemption {
            server: model.server.into(),
            joined: model.joined,
        }
    }
}
