//! Conversation entity <-> model mapper

use hearth_core::entities::Conversation;
use hearth_core::value_objects::{ConversationId, MemberId};

use crate::models::ConversationModel;

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: ConversationId::from_uuid(model.id),
            member_one_id: MemberId::from_uuid(model.member_one_id),
            member_two_id: MemberId::from_uuid(model.member_two_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
