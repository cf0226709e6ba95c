//! Channel service
//!
//! Channel writes are open to ADMIN and MODERATOR members. The reserved
//! general channel is rejected here by name and again by the guarded write.

use hearth_core::entities::Channel;
use hearth_core::{ChannelId, ProfileId, ServerId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateChannelRequest, ServerDetailResponse, UpdateChannelRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;
use super::server::ServerService;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel in a server
    #[instrument(skip(self, request))]
    pub async fn create_channel(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        request: CreateChannelRequest,
    ) -> ServiceResult<ServerDetailResponse> {
        request.validate()?;
        let name = request.name.trim();
        Channel::check_assignable_name(name)?;

        let channel = Channel::new(
            ChannelId::generate(),
            server_id,
            caller,
            name.to_string(),
            request.channel_type,
        );

        if !self.ctx.channel_repo().create_as_manager(&channel).await? {
            return Err(PermissionService::new(self.ctx)
                .explain_channel_rejection(server_id, None, caller)
                .await);
        }

        info!(
            server_id = %server_id,
            channel_id = %channel.id,
            channel_type = %channel.channel_type,
            "Channel created"
        );

        self.server_detail(server_id).await
    }

    /// Rename or retype a channel other than general
    #[instrument(skip(self, request))]
    pub async fn edit_channel(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        channel_id: ChannelId,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ServerDetailResponse> {
        request.validate()?;
        let name = request.name.trim();
        Channel::check_assignable_name(name)?;

        let updated = self
            .ctx
            .channel_repo()
            .update_as_manager(server_id, channel_id, caller, name, request.channel_type)
            .await?;

        if updated.is_none() {
            return Err(PermissionService::new(self.ctx)
                .explain_channel_rejection(server_id, Some(channel_id), caller)
                .await);
        }

        info!(server_id = %server_id, channel_id = %channel_id, "Channel updated");

        self.server_detail(server_id).await
    }

    /// Delete a channel other than general
    #[instrument(skip(self))]
    pub async fn delete_channel(
        &self,
        caller: ProfileId,
        server_id: ServerId,
        channel_id: ChannelId,
    ) -> ServiceResult<ServerDetailResponse> {
        let deleted = self
            .ctx
            .channel_repo()
            .delete_as_manager(server_id, channel_id, caller)
            .await?;

        if !deleted {
            return Err(PermissionService::new(self.ctx)
                .explain_channel_rejection(server_id, Some(channel_id), caller)
                .await);
        }

        info!(server_id = %server_id, channel_id = %channel_id, "Channel deleted");

        self.server_detail(server_id).await
    }

    async fn server_detail(&self, server_id: ServerId) -> ServiceResult<ServerDetailResponse> {
        let detail = ServerService::new(self.ctx).load_detail(server_id).await?;
        Ok(ServerDetailResponse::from(&detail))
    }
}
