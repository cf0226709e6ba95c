//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hearth_core::entities::{Member, MemberRole, MemberWithProfile, Server};
use hearth_core::traits::{MemberRepository, RepoResult};
use hearth_core::value_objects::{MemberId, ProfileId, ServerId};

use crate::models::{MemberModel, MemberWithProfileModel, ServerModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, role::TEXT AS role, profile_id, server_id, created_at, updated_at
            FROM members
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_with_profile(&self, id: MemberId) -> RepoResult<Option<MemberWithProfile>> {
        let result = sqlx::query_as::<_, MemberWithProfileModel>(
            r"
            SELECT m.id, m.role::TEXT AS role, m.profile_id, m.server_id, m.created_at, m.updated_at,
                   p.user_id AS profile_user_id, p.name AS profile_name,
                   p.image_url AS profile_image_url, p.email AS profile_email,
                   p.created_at AS profile_created_at, p.updated_at AS profile_updated_at
            FROM members m
            INNER JOIN profiles p ON p.id = m.profile_id
            WHERE m.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MemberWithProfile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_server_and_profile(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, role::TEXT AS role, profile_id, server_id, created_at, updated_at
            FROM members
            WHERE server_id = $1 AND profile_id = $2
            ",
        )
        .bind(server_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_with_profile_by_server_and_profile(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<MemberWithProfile>> {
        let result = sqlx::query_as::<_, MemberWithProfileModel>(
            r"
            SELECT m.id, m.role::TEXT AS role, m.profile_id, m.server_id, m.created_at, m.updated_at,
                   p.user_id AS profile_user_id, p.name AS profile_name,
                   p.image_url AS profile_image_url, p.email AS profile_email,
                   p.created_at AS profile_created_at, p.updated_at AS profile_updated_at
            FROM members m
            INNER JOIN profiles p ON p.id = m.profile_id
            WHERE m.server_id = $1 AND m.profile_id = $2
            ",
        )
        .bind(server_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MemberWithProfile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_server(&self, server_id: ServerId) -> RepoResult<Vec<MemberWithProfile>> {
        // member_role enum order is ADMIN, MODERATOR, GUEST
        let results = sqlx::query_as::<_, MemberWithProfileModel>(
            r"
            SELECT m.id, m.role::TEXT AS role, m.profile_id, m.server_id, m.created_at, m.updated_at,
                   p.user_id AS profile_user_id, p.name AS profile_name,
                   p.image_url AS profile_image_url, p.email AS profile_email,
                   p.created_at AS profile_created_at, p.updated_at AS profile_updated_at
            FROM members m
            INNER JOIN profiles p ON p.id = m.profile_id
            WHERE m.server_id = $1
            ORDER BY m.role ASC, m.created_at ASC
            ",
        )
        .bind(server_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberWithProfile::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_role_as_owner(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        owner: ProfileId,
        role: MemberRole,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE members m
            SET role = $4::member_role, updated_at = NOW()
            FROM servers s
            WHERE m.id = $2
              AND m.server_id = $1
              AND s.id = m.server_id
              AND s.profile_id = $3
              AND m.profile_id <> $3
            ",
        )
        .bind(server_id.into_inner())
        .bind(member_id.into_inner())
        .bind(owner.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_as_owner(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        owner: ProfileId,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM members m
            USING servers s
            WHERE m.id = $2
              AND m.server_id = $1
              AND s.id = m.server_id
              AND s.profile_id = $3
              AND m.profile_id <> $3
            ",
        )
        .bind(server_id.into_inner())
        .bind(member_id.into_inner())
        .bind(owner.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_own_membership(
        &self,
        server_id: ServerId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r"
            DELETE FROM members m
            USING servers s
            WHERE m.server_id = $1
              AND m.profile_id = $2
              AND s.id = m.server_id
              AND s.profile_id <> $2
            RETURNING s.id, s.name, s.image_url, s.invite_code, s.profile_id,
                      s.created_at, s.updated_at
            ",
        )
        .bind(server_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }
}
