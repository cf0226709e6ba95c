//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for channels table (`type` selected as `channel_type` TEXT)
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: Uuid,
    pub name: String,
    pub channel_type: String,
    pub profile_id: Uuid,
    pub server_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
