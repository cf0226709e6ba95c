//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hearth_core::entities::Profile;
use hearth_core::error::DomainError;
use hearth_core::traits::{ProfileRepository, RepoResult};
use hearth_core::value_objects::ProfileId;

use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProfileId) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, name, image_url, email, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, name, image_url, email, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn create_or_get(&self, profile: &Profile) -> RepoResult<Profile> {
        let inserted = sqlx::query_as::<_, ProfileModel>(
            r"
            INSERT INTO profiles (id, user_id, name, image_url, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id, user_id, name, image_url, email, created_at, updated_at
            ",
        )
        .bind(profile.id.into_inner())
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(&profile.image_url)
        .bind(&profile.email)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ProfileExists))?;

        if let Some(model) = inserted {
            return Ok(model.into());
        }

        // Another request created it first
        self.find_by_user_id(&profile.user_id)
            .await?
            .ok_or(DomainError::ProfileExists)
    }
}
