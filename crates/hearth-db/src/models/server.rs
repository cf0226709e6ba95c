//! Server database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for servers table
#[derive(Debug, Clone, FromRow)]
pub struct ServerModel {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row returned by the invite redemption statement
#[derive(Debug, Clone, FromRow)]
pub struct InviteRedemptionModel {
    #[sqlx(flatten)]
    pub server: ServerModel,
    /// Whether a membership row was inserted
    pub joined: bool,
}
