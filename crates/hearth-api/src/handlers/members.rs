//! Member handlers
//!
//! Endpoints for server membership management.

use axum::{extract::State, Json};
use hearth_service::{
    MemberResponse, MemberService, ServerDetailResponse, ServerResponse, UpdateMemberRoleRequest,
};

use crate::extractors::{
    CurrentProfile, ParsedPath, ServerIdPath, ServerMemberPath, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's own membership, or null
///
/// GET /servers/{server_id}/members/@me
pub async fn get_current_member(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
) -> ApiResult<Json<Option<MemberResponse>>> {
    let server_id = path.server_id()?;

    let service = MemberService::new(state.service_context());
    let response = service.current_member(profile.id, server_id).await?;
    Ok(Json(response))
}

/// Leave a server
///
/// DELETE /servers/{server_id}/members/@me
pub async fn leave_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = path.server_id()?;

    let service = MemberService::new(state.service_context());
    let response = service.leave_server(profile.id, server_id).await?;
    Ok(Json(response))
}

/// Change a member's role
///
/// PATCH /servers/{server_id}/members/{member_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerMemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRoleRequest>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = path.server_id()?;
    let member_id = path.member_id()?;

    let service = MemberService::new(state.service_context());
    let response = service
        .change_role(profile.id, server_id, member_id, request.role)
        .await?;
    Ok(Json(response))
}

/// Kick a member
///
/// DELETE /servers/{server_id}/members/{member_id}
pub async fn kick_member(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerMemberPath>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = path.server_id()?;
    let member_id = path.member_id()?;

    let service = MemberService::new(state.service_context());
    let response = service.kick_member(profile.id, server_id, member_id).await?;
    Ok(Json(response))
}
