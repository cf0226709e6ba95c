//! PostgreSQL implementation of ServerRepository
//!
//! Owner-only writes carry `profile_id = $owner` in their WHERE clause; a
//! non-owner simply matches no row.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hearth_core::entities::{Channel, Member, Server};
use hearth_core::error::DomainError;
use hearth_core::traits::{InviteRedemption, RepoResult, ServerRepository};
use hearth_core::value_objects::{InviteCode, MemberId, ProfileId, ServerId};

use crate::models::{InviteRedemptionModel, ServerModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// PostgreSQL implementation of ServerRepository
#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ServerId) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            SELECT id, name, image_url, invite_code, profile_id, created_at, updated_at
            FROM servers
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self))]
    async fn find_first_for_profile(&self, profile_id: ProfileId) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            SELECT s.id, s.name, s.image_url, s.invite_code, s.profile_id, s.created_at, s.updated_at
            FROM servers s
            INNER JOIN members m ON m.server_id = s.id
            WHERE m.profile_id = $1
            ORDER BY s.created_at ASC
            LIMIT 1
            ",
        )
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self))]
    async fn find_for_profile(&self, profile_id: ProfileId) -> RepoResult<Vec<Server>> {
        let results = sqlx::query_as::<_, ServerModel>(
            r"
            SELECT s.id, s.name, s.image_url, s.invite_code, s.profile_id, s.created_at, s.updated_at
            FROM servers s
            INNER JOIN members m ON m.server_id = s.id
            WHERE m.profile_id = $1
            ORDER BY s.created_at ASC
            ",
        )
        .bind(profile_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Server::from).collect())
    }

    #[instrument(skip(self, invite_code))]
    async fn find_by_invite_for_member(
        &self,
        invite_code: &InviteCode,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            SELECT s.id, s.name, s.image_url, s.invite_code, s.profile_id, s.created_at, s.updated_at
            FROM servers s
            INNER JOIN members m ON m.server_id = s.id
            WHERE s.invite_code = $1 AND m.profile_id = $2
            ",
        )
        .bind(invite_code.as_str())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self, server, general, owner), fields(server_id = %server.id))]
    async fn create_with_defaults(
        &self,
        server: &Server,
        general: &Channel,
        owner: &Member,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO servers (id, name, image_url, invite_code, profile_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(server.id.into_inner())
        .bind(&server.name)
        .bind(&server.image_url)
        .bind(server.invite_code.as_str())
        .bind(server.profile_id.into_inner())
        .bind(server.created_at)
        .bind(server.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteCodeExists))?;

        sqlx::query(
            r"
            INSERT INTO channels (id, name, type, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2, $3::channel_type, $4, $5, $6, $7)
            ",
        )
        .bind(general.id.into_inner())
        .bind(&general.name)
        .bind(general.channel_type.as_str())
        .bind(general.profile_id.into_inner())
        .bind(general.server_id.into_inner())
        .bind(general.created_at)
        .bind(general.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO members (id, role, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2::member_role, $3, $4, $5, $6)
            ",
        )
        .bind(owner.id.into_inner())
        .bind(owner.role.as_str())
        .bind(owner.profile_id.into_inner())
        .bind(owner.server_id.into_inner())
        .bind(owner.created_at)
        .bind(owner.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ProfileNotFound))?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, name, image_url))]
    async fn update_as_owner(
        &self,
        id: ServerId,
        owner: ProfileId,
        name: &str,
        image_url: &str,
    ) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            UPDATE servers
            SET name = $3, image_url = $4, updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING id, name, image_url, invite_code, profile_id, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .bind(name)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self, invite_code))]
    async fn rotate_invite_code(
        &self,
        id: ServerId,
        owner: ProfileId,
        invite_code: &InviteCode,
    ) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            UPDATE servers
            SET invite_code = $3, updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING id, name, image_url, invite_code, profile_id, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .bind(invite_code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteCodeExists))?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self))]
    async fn delete_as_owner(&self, id: ServerId, owner: ProfileId) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            DELETE FROM servers
            WHERE id = $1 AND profile_id = $2
            RETURNING id, name, image_url, invite_code, profile_id, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self, invite_code))]
    async fn join_by_invite(
        &self,
        invite_code: &InviteCode,
        member_id: MemberId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<InviteRedemption>> {
        // Locking the server row serializes concurrent redemptions; the unique
        // (server_id, profile_id) key absorbs duplicates.
        let result = sqlx::query_as::<_, InviteRedemptionModel>(
            r"
            WITH target AS (
                UPDATE servers
                SET updated_at = NOW()
                WHERE invite_code = $1
                RETURNING id, name, image_url, invite_code, profile_id, created_at, updated_at
            ),
            inserted AS (
                INSERT INTO members (id, role, profile_id, server_id)
                SELECT $2, 'GUEST'::member_role, $3, target.id
                FROM target
                ON CONFLICT (server_id, profile_id) DO NOTHING
                RETURNING id
            )
            SELECT target.id, target.name, target.image_url, target.invite_code,
                   target.profile_id, target.created_at, target.updated_at,
                   EXISTS (SELECT 1 FROM inserted) AS joined
            FROM target
            ",
        )
        .bind(invite_code.as_str())
        .bind(member_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ProfileNotFound))?;

        Ok(result.map(InviteRedemption::from))
    }
}
