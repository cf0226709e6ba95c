//! Channel entity <-> model mapper

use hearth_core::entities::{Channel, ChannelType};
use hearth_core::value_objects::{ChannelId, ProfileId, ServerId};

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: ChannelId::from_uuid(model.id),
            name: model.name,
            channel_type: ChannelType::from(model.channel_type.as_str()),
            profile_id: ProfileId::from_uuid(model.profile_id),
            server_id: ServerId::from_uuid(model.server_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
