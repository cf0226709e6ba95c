//! Member service
//!
//! Role changes, kicks and leaving a server.

use hearth_core::{MemberId, MemberRole, ProfileId, ServerId};
use tracing::{info, instrument};

use crate::dto::{MemberResponse, ServerDetailResponse, ServerResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;
use super::server::ServerService;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Change another member's role (owner only)
    #[instrument(skip(self))]
    pub async fn change_role(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        member_id: MemberId,
        role: MemberRole,
    ) -> ServiceResult<ServerDetailResponse> {
        let updated = self
            .ctx
            .member_repo()
            .update_role_as_owner(server_id, member_id, caller, role)
            .await?;

        if !updated {
            return Err(PermissionService::new(self.ctx)
                .explain_member_rejection(server_id, member_id, caller)
                .await);
        }

        info!(server_id = %server_id, member_id = %member_id, role = %role, "Member role changed");

        let detail = ServerService::new(self.ctx).load_detail(server_id).await?;
        Ok(ServerDetailResponse::from(&detail))
    }

    /// Remove another member from the server (owner only)
    #[instrument(skip(self))]
    pub async fn kick_member(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        member_id: MemberId,
    ) -> ServiceResult<ServerDetailResponse> {
        let removed = self
            .ctx
            .member_repo()
            .delete_as_owner(server_id, member_id, caller)
            .await?;

        if !removed {
            return Err(PermissionService::new(self.ctx)
                .explain_member_rejection(server_id, member_id, caller)
                .await);
        }

        info!(server_id = %server_id, member_id = %member_id, "Member kicked");

        let detail = ServerService::new(self.ctx).load_detail(server_id).await?;
        Ok(ServerDetailResponse::from(&detail))
    }

    /// Drop the caller's own membership; owners cannot leave
    #[instrument(skip(self))]
    pub async fn leave_server(
        &self,
        caller: ProfileId,
        server_id: ServerId,
    ) -> ServiceResult<ServerResponse> {
        let Some(server) = self
            .ctx
            .member_repo()
            .delete_own_membership(server_id, caller)
            .await?
        else {
            return Err(PermissionService::new(self.ctx)
                .explain_leave_rejection(server_id, caller)
                .await);
        };

        info!(server_id = %server_id, profile_id = %caller, "Member left server");
        Ok(ServerResponse::from(&server))
    }

    /// The caller's membership in a server, if any
    #[instrument(skip(self))]
    pub async fn current_member(
        &self,
        caller: ProfileId,
        server_id: ServerId,
    ) -> ServiceResult<Option<MemberResponse>> {
        let member = self
            .ctx
            .member_repo()
            .find_with_profile_by_server_and_profile(server_id, caller)
            .await?;

        Ok(member.as_ref().map(MemberResponse::from))
    }
}
