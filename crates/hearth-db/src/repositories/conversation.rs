//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hearth_core::entities::Conversation;
use hearth_core::error::DomainError;
use hearth_core::traits::{ConversationRepository, RepoResult};
use hearth_core::value_objects::MemberId;

use crate::models::ConversationModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conversation for the unordered pair, if any
    async fn find_pair(
        &self,
        a: MemberId,
        b: MemberId,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, member_one_id, member_two_id, created_at, updated_at
            FROM conversations
            WHERE LEAST(member_one_id, member_two_id) = LEAST($1::UUID, $2::UUID)
              AND GREATEST(member_one_id, member_two_id) = GREATEST($1::UUID, $2::UUID)
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_ordered(
        &self,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, member_one_id, member_two_id, created_at, updated_at
            FROM conversations
            WHERE member_one_id = $1 AND member_two_id = $2
            ",
        )
        .bind(member_one_id.into_inner())
        .bind(member_two_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, conversation), fields(
        member_one_id = %conversation.member_one_id,
        member_two_id = %conversation.member_two_id,
    ))]
    async fn create_or_get(&self, conversation: &Conversation) -> RepoResult<Conversation> {
        let inserted = sqlx::query_as::<_, ConversationModel>(
            r"
            INSERT INTO conversations (id, member_one_id, member_two_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            RETURNING id, member_one_id, member_two_id, created_at, updated_at
            ",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.member_one_id.into_inner())
        .bind(conversation.member_two_id.into_inner())
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::MemberNotFound(conversation.member_two_id))
        })?;

        if let Some(model) = inserted {
            return Ok(model.into());
        }

        // Lost the race for this pair; the winner's row is committed
        self.find_pair(conversation.member_one_id, conversation.member_two_id)
            .await?
            .ok_or(DomainError::ConversationExists)
    }
}
