//! Conversation service
//!
//! Find-or-create for 1:1 conversations. A pair of members has at most one
//! conversation whichever slot each of them was stored in.

use hearth_core::entities::{Conversation, ConversationDetail, MemberWithProfile};
use hearth_core::{ConversationId, DomainError, MemberId, ProfileId};
use tracing::{debug, info, instrument};

use crate::dto::ConversationResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Existing conversation between two members, in either order
    #[instrument(skip(self))]
    pub async fn find_conversation(
        &self,
        caller: ProfileId,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> ServiceResult<Option<ConversationResponse>> {
        let (one, two) = self.participants(caller, member_one_id, member_two_id).await?;

        let found = self.lookup(member_one_id, member_two_id).await?;
        Ok(found.map(|conversation| ConversationResponse::from(attach(conversation, one, two))))
    }

    /// Existing conversation between two members, created if missing
    #[instrument(skip(self))]
    pub async fn get_or_create(
        &self,
        caller: ProfileId,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> ServiceResult<ConversationResponse> {
        let (one, two) = self.participants(caller, member_one_id, member_two_id).await?;

        if let Some(conversation) = self.lookup(member_one_id, member_two_id).await? {
            return Ok(ConversationResponse::from(attach(conversation, one, two)));
        }

        let candidate = Conversation::new(ConversationId::generate(), member_one_id, member_two_id);
        let stored = self.ctx.conversation_repo().create_or_get(&candidate).await?;

        if stored.id == candidate.id {
            info!(
                conversation_id = %stored.id,
                member_one_id = %member_one_id,
                member_two_id = %member_two_id,
                "Conversation created"
            );
        } else {
            debug!(conversation_id = %stored.id, "Conversation created concurrently");
        }

        Ok(ConversationResponse::from(attach(stored, one, two)))
    }

    async fn lookup(
        &self,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> ServiceResult<Option<Conversation>> {
        let repo = self.ctx.conversation_repo();
        if let Some(found) = repo.find_ordered(member_one_id, member_two_id).await? {
            return Ok(Some(found));
        }
        Ok(repo.find_ordered(member_two_id, member_one_id).await?)
    }

    /// Load both members and check the caller may see their conversation
    async fn participants(
        &self,
        caller: ProfileId,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> ServiceResult<(MemberWithProfile, MemberWithProfile)> {
        if member_one_id == member_two_id {
            return Err(DomainError::SelfConversation.into());
        }

        let members = self.ctx.member_repo();
        let one = members
            .find_with_profile(member_one_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_one_id))?;
        let two = members
            .find_with_profile(member_two_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_two_id))?;

        if one.member.server_id != two.member.server_id {
            return Err(DomainError::CrossServerConversation.into());
        }

        if one.member.profile_id != caller && two.member.profile_id != caller {
            debug!(profile_id = %caller, "Caller is not a participant");
            return Err(DomainError::NotConversationParticipant.into());
        }

        Ok((one, two))
    }
}

/// Expand a conversation with the loaded members in its stored slot order
fn attach(
    conversation: Conversation,
    a: MemberWithProfile,
    b: MemberWithProfile,
) -> ConversationDetail {
    let (member_one, member_two) = if conversation.member_one_id == a.member.id {
        (a, b)
    } else {
        (b, a)
    };

    ConversationDetail {
        conversation,
        member_one,
        member_two,
    }
}
