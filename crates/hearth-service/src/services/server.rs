//! Server service
//!
//! Handles server creation, owner-only management and the member-facing
//! server views.

use hearth_core::entities::{Channel, Member, Server, ServerDetail};
use hearth_core::{ChannelId, DomainError, InviteCode, MemberId, ProfileId, ServerId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateServerRequest, ServerDetailResponse, ServerResponse, SetupResponse, UpdateServerRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Server service
pub struct ServerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ServerService<'a> {
    /// Create a new ServerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a server owned by the caller
    ///
    /// The server, its general channel and the caller's ADMIN membership are
    /// stored together or not at all.
    #[instrument(skip(self, request))]
    pub async fn create_server(
        &self,
        caller: ProfileId,
        request: CreateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        request.validate()?;

        let server = Server::new(
            ServerId::generate(),
            request.name.trim().to_string(),
            request.image_url.trim().to_string(),
            caller,
        );
        let general = Channel::general(ChannelId::generate(), server.id, caller);
        let owner = Member::owner(MemberId::generate(), caller, server.id);

        self.ctx
            .server_repo()
            .create_with_defaults(&server, &general, &owner)
            .await?;

        info!(server_id = %server.id, owner_id = %caller, "Server created successfully");

        Ok(ServerResponse::from(&server))
    }

    /// Rename the server or change its image (owner only)
    #[instrument(skip(self, request))]
    pub async fn update_server(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        request: UpdateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        request.validate()?;

        let updated = self
            .ctx
            .server_repo()
            .update_as_owner(
                server_id,
                caller,
                request.name.trim(),
                request.image_url.trim(),
            )
            .await?;

        match updated {
            Some(server) => {
                info!(server_id = %server_id, "Server updated");
                Ok(ServerResponse::from(&server))
            }
            None => Err(PermissionService::new(self.ctx)
                .explain_owner_rejection(server_id, caller)
                .await),
        }
    }

    /// Replace the invite code (owner only); the old code stops resolving
    #[instrument(skip(self))]
    pub async fn rotate_invite_code(
        &self,
        caller: ProfileId,
        server_id: ServerId,
    ) -> ServiceResult<ServerResponse> {
        let code = InviteCode::generate();
        let rotated = self
            .ctx
            .server_repo()
            .rotate_invite_code(server_id, caller, &code)
            .await?;

        match rotated {
            Some(server) => {
                info!(server_id = %server_id, "Invite code rotated");
                Ok(ServerResponse::from(&server))
            }
            None => Err(PermissionService::new(self.ctx)
                .explain_owner_rejection(server_id, caller)
                .await),
        }
    }

    /// Delete the server with all its channels and memberships (owner only)
    #[instrument(skip(self))]
    pub async fn delete_server(
        &self,
        caller: ProfileId,
        server_id: ServerId,
    ) -> ServiceResult<ServerResponse> {
        let deleted = self.ctx.server_repo().delete_as_owner(server_id, caller).await?;

        match deleted {
            Some(server) => {
                info!(server_id = %server_id, owner_id = %caller, "Server deleted");
                Ok(ServerResponse::from(&server))
            }
            None => Err(PermissionService::new(self.ctx)
                .explain_owner_rejection(server_id, caller)
                .await),
        }
    }

    /// Where to send a caller arriving at the setup page
    #[instrument(skip(self))]
    pub async fn find_first_server(&self, caller: ProfileId) -> ServiceResult<SetupResponse> {
        let first = self.ctx.server_repo().find_first_for_profile(caller).await?;

        Ok(match first {
            Some(server) => SetupResponse::Redirect {
                server_id: server.id,
            },
            None => SetupResponse::CreateFirstServer,
        })
    }

    /// Servers the caller belongs to
    #[instrument(skip(self))]
    pub async fn list_servers(&self, caller: ProfileId) -> ServiceResult<Vec<ServerResponse>> {
        let servers = self.ctx.server_repo().find_for_profile(caller).await?;
        Ok(servers.iter().map(ServerResponse::from).collect())
    }

    /// Server with channels and members, visible to members only
    #[instrument(skip(self))]
    pub async fn get_server(
        &self,
        caller: ProfileId,
        server_id: ServerId,
    ) -> ServiceResult<ServerDetailResponse> {
        PermissionService::new(self.ctx)
            .require_membership(server_id, caller)
            .await?;

        let detail = self.load_detail(server_id).await?;
        Ok(ServerDetailResponse::from(&detail))
    }

    /// Read a server with its channels and members as currently stored
    pub(crate) async fn load_detail(&self, server_id: ServerId) -> ServiceResult<ServerDetail> {
        let server = self
            .ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or(DomainError::ServerNotFound(server_id))?;

        let channels = self.ctx.channel_repo().find_by_server(server_id).await?;
        let members = self.ctx.member_repo().find_by_server(server_id).await?;

        Ok(ServerDetail {
            server,
            channels,
            members,
        })
    }
}
