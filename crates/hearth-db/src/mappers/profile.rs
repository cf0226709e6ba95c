//! Profile entity <-> model mapper

use hearth_core::entities::Profile;
use hearth_core::value_objects::ProfileId;

use crate::models::ProfileModel;

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: ProfileId::from_uuid(model.id),
            user_id: model.user_id,
            name: model.name,
            image_url: model.image_url,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
