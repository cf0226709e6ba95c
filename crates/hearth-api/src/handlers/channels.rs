//! Channel handlers
//!
//! Endpoints for channel management. Each returns the server with its
//! channels and members as they are after the change.

use axum::{extract::State, Json};
use hearth_service::{
    ChannelService, CreateChannelRequest, ServerDetailResponse, UpdateChannelRequest,
};

use crate::extractors::{
    CurrentProfile, ParsedPath, ServerChannelPath, ServerIdPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a channel
///
/// POST /servers/{server_id}/channels
pub async fn create_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ServerDetailResponse>>> {
    let server_id = path.server_id()?;

    let service = ChannelService::new(state.service_context());
    let response = service.create_channel(profile.id, server_id, request).await?;
    Ok(Created(Json(response)))
}

/// Rename or retype a channel
///
/// PATCH /servers/{server_id}/channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerChannelPath>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = path.server_id()?;
    let channel_id = path.channel_id()?;

    let service = ChannelService::new(state.service_context());
    let response = service
        .edit_channel(profile.id, server_id, channel_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a channel
///
/// DELETE /servers/{server_id}/channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerChannelPath>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = path.server_id()?;
    let channel_id = path.channel_id()?;

    let service = ChannelService::new(state.service_context());
    let response = service
        .delete_channel(profile.id, server_id, channel_id)
        .await?;
    Ok(Json(response))
}
