//! Permission service
//!
//! Guarded writes report only "nothing matched". When that happens the
//! services ask this module why, by reading the state as it is after the
//! write. None of these reads gate a mutation.

use hearth_core::entities::Member;
use hearth_core::{ChannelId, DomainError, MemberId, ProfileId, ServerId};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's membership in a server; non-members see `NotFound`
    #[instrument(skip(self))]
    pub async fn require_membership(
        &self,
        server_id: ServerId,
        caller: ProfileId,
    ) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_server_and_profile(server_id, caller)
            .await?
            .ok_or_else(|| {
                debug!(server_id = %server_id, profile_id = %caller, "Not a member");
                DomainError::ServerNotFound(server_id).into()
            })
    }

    /// Why an owner-only server write matched nothing
    #[instrument(skip(self))]
    pub async fn explain_owner_rejection(
        &self,
        server_id: ServerId,
        caller: ProfileId,
    ) -> ServiceError {
        log_rejection(settle(self.owner_rejection(server_id, caller).await))
    }

    /// Why a role change or kick matched nothing
    #[instrument(skip(self))]
    pub async fn explain_member_rejection(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        caller: ProfileId,
    ) -> ServiceError {
        log_rejection(settle(self.member_rejection(server_id, member_id, caller).await))
    }

    /// Why leaving a server matched nothing
    #[instrument(skip(self))]
    pub async fn explain_leave_rejection(
        &self,
        server_id: ServerId,
        caller: ProfileId,
    ) -> ServiceError {
        log_rejection(settle(self.leave_rejection(server_id, caller).await))
    }

    /// Why a channel write matched nothing
    ///
    /// `channel_id` is `None` for creation. A missing or general channel is
    /// reported before the caller's role, so "general" is rejected the same
    /// way for every role.
    #[instrument(skip(self))]
    pub async fn explain_channel_rejection(
        &self,
        server_id: ServerId,
        channel_id: Option<ChannelId>,
        caller: ProfileId,
    ) -> ServiceError {
        log_rejection(settle(
            self.channel_rejection(server_id, channel_id, caller).await,
        ))
    }

    async fn owner_rejection(
        &self,
        server_id: ServerId,
        caller: ProfileId,
    ) -> ServiceResult<ServiceError> {
        let Some(server) = self.ctx.server_repo().find_by_id(server_id).await? else {
            return Ok(DomainError::ServerNotFound(server_id).into());
        };
        if !server.is_owner(caller) {
            return Ok(DomainError::NotServerOwner.into());
        }
        Ok(ServiceError::internal("owner write matched no row"))
    }

    async fn member_rejection(
        &self,
        server_id: ServerId,
        member_id: MemberId,
        caller: ProfileId,
    ) -> ServiceResult<ServiceError> {
        let Some(server) = self.ctx.server_repo().find_by_id(server_id).await? else {
            return Ok(DomainError::ServerNotFound(server_id).into());
        };
        if !server.is_owner(caller) {
            return Ok(DomainError::NotServerOwner.into());
        }
        match self.ctx.member_repo().find_by_id(member_id).await? {
            Some(member) if member.server_id == server_id && member.profile_id == caller => {
                Ok(DomainError::CannotTargetSelf.into())
            }
            _ => Ok(DomainError::MemberNotFound(member_id).into()),
        }
    }

    async fn leave_rejection(
        &self,
        server_id: ServerId,
        caller: ProfileId,
    ) -> ServiceResult<ServiceError> {
        let Some(server) = self.ctx.server_repo().find_by_id(server_id).await? else {
            return Ok(DomainError::ServerNotFound(server_id).into());
        };
        if server.is_owner(caller) {
            return Ok(DomainError::OwnerCannotLeave.into());
        }
        Ok(DomainError::MembershipNotFound.into())
    }

    async fn channel_rejection(
        &self,
        server_id: ServerId,
        channel_id: Option<ChannelId>,
        caller: ProfileId,
    ) -> ServiceResult<ServiceError> {
        if self.ctx.server_repo().find_by_id(server_id).await?.is_none() {
            return Ok(DomainError::ServerNotFound(server_id).into());
        }
        if let Some(channel_id) = channel_id {
            match self.ctx.channel_repo().find_by_id(channel_id).await? {
                Some(channel) if channel.server_id == server_id => {
                    if channel.is_general() {
                        return Ok(DomainError::GeneralChannelImmutable.into());
                    }
                }
                _ => return Ok(DomainError::ChannelNotFound(channel_id).into()),
            }
        }
        let membership = self
            .ctx
            .member_repo()
            .find_by_server_and_profile(server_id, caller)
            .await?;
        if !membership.is_some_and(|m| m.role.can_manage_channels()) {
            return Ok(DomainError::InsufficientRole.into());
        }
        Ok(match channel_id {
            Some(channel_id) => DomainError::ChannelNotFound(channel_id).into(),
            None => ServiceError::internal("channel write matched no row"),
        })
    }
}

/// A failed lookup is itself the error to report
fn settle(result: ServiceResult<ServiceError>) -> ServiceError {
    match result {
        Ok(err) | Err(err) => err,
    }
}

fn log_rejection(err: ServiceError) -> ServiceError {
    warn!(code = err.error_code(), error = %err, "Guarded write rejected");
    err
}
