//! PostgreSQL implementation of ChannelRepository
//!
//! Manager checks are an `EXISTS` over the acting profile's membership with a
//! role in [`channel_manager_roles`], evaluated inside the write itself. The
//! general channel is excluded by name in every update and delete.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hearth_core::entities::{Channel, ChannelType, GENERAL_CHANNEL_NAME};
use hearth_core::error::DomainError;
use hearth_core::traits::{ChannelRepository, RepoResult};
use hearth_core::value_objects::{ChannelId, ProfileId, ServerId};

use crate::mappers::channel_manager_roles;
use crate::models::ChannelModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChannelId) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, name, type::TEXT AS channel_type, profile_id, server_id, created_at, updated_at
            FROM channels
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_server(&self, server_id: ServerId) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, name, type::TEXT AS channel_type, profile_id, server_id, created_at, updated_at
            FROM channels
            WHERE server_id = $1
            ORDER BY (name = $2) DESC, created_at ASC
            ",
        )
        .bind(server_id.into_inner())
        .bind(GENERAL_CHANNEL_NAME)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel), fields(server_id = %channel.server_id, name = %channel.name))]
    async fn create_as_manager(&self, channel: &Channel) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO channels (id, name, type, profile_id, server_id, created_at, updated_at)
            SELECT $1, $2, $3::channel_type, $4, $5, $6, $7
            WHERE EXISTS (
                SELECT 1 FROM members
                WHERE server_id = $5
                  AND profile_id = $4
                  AND role::TEXT = ANY($8)
            )
            ",
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.as_str())
        .bind(channel.profile_id.into_inner())
        .bind(channel.server_id.into_inner())
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .bind(channel_manager_roles())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReservedChannelName))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, name))]
    async fn update_as_manager(
        &self,
        server_id: ServerId,
        channel_id: ChannelId,
        manager: ProfileId,
        name: &str,
        channel_type: ChannelType,
    ) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            UPDATE channels c
            SET name = $4, type = $5::channel_type, updated_at = NOW()
            WHERE c.id = $2
              AND c.server_id = $1
              AND c.name <> $6
              AND EXISTS (
                  SELECT 1 FROM members m
                  WHERE m.server_id = $1
                    AND m.profile_id = $3
                    AND m.role::TEXT = ANY($7)
              )
            RETURNING c.id, c.name, c.type::TEXT AS channel_type, c.profile_id, c.server_id,
                      c.created_at, c.updated_at
            ",
        )
        .bind(server_id.into_inner())
        .bind(channel_id.into_inner())
        .bind(manager.into_inner())
        .bind(name)
        .bind(channel_type.as_str())
        .bind(GENERAL_CHANNEL_NAME)
        .bind(channel_manager_roles())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReservedChannelName))?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn delete_as_manager(
        &self,
        server_id: ServerId,
        channel_id: ChannelId,
        manager: ProfileId,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM channels c
            WHERE c.id = $2
              AND c.server_id = $1
              AND c.name <> $4
              AND EXISTS (
                  SELECT 1 FROM members m
                  WHERE m.server_id = $1
                    AND m.profile_id = $3
                    AND m.role::TEXT = ANY($5)
              )
            ",
        )
        .bind(server_id.into_inner())
        .bind(channel_id.into_inner())
        .bind(manager.into_inner())
        .bind(GENERAL_CHANNEL_NAME)
        .bind(channel_manager_roles())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
