//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for members table (`role` selected as TEXT)
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: Uuid,
    pub role: String,
    pub profile_id: Uuid,
    pub server_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member row joined with its profile
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithProfileModel {
    #[sqlx(flatten)]
    pub member: MemberModel,
    pub profile_user_id: String,
    pub profile_name: String,
    pub profile_image_url: String,
    pub profile_email: String,
    pub profile_created_at: DateTime<Utc>,
    pub profile_updated_at: DateTime<Utc>,
}
