//! Server handlers
//!
//! Endpoints for server management.

use axum::{extract::State, Json};
use hearth_service::{
    CreateServerRequest, ServerDetailResponse, ServerResponse, ServerService, UpdateServerRequest,
};

use crate::extractors::{CurrentProfile, ParsedPath, ServerIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a new server
///
/// POST /servers
pub async fn create_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ValidatedJson(request): ValidatedJson<CreateServerRequest>,
) -> ApiResult<Created<Json<ServerResponse>>> {
    let service = ServerService::new(state.service_context());
    let response = service.create_server(profile.id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a server with its channels and members
///
/// GET /servers/{server_id}
pub async fn get_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = path.server_id()?;

    let service = ServerService::new(state.service_context());
    let response = service.get_server(profile.id, server_id).await?;
    Ok(Json(response))
}

/// Update server name and image
///
/// PATCH /servers/{server_id}
pub async fn update_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateServerRequest>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = path.server_id()?;

    let service = ServerService::new(state.service_context());
    let response = service.update_server(profile.id, server_id, request).await?;
    Ok(Json(response))
}

/// Delete server
///
/// DELETE /servers/{server_id}
pub async fn delete_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = path.server_id()?;

    let service = ServerService::new(state.service_context());
    let response = service.delete_server(profile.id, server_id).await?;
    Ok(Json(response))
}

/// Generate a new invite code
///
/// POST /servers/{server_id}/invite-code
pub async fn rotate_invite_code(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<ServerIdPath>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = path.server_id()?;

    let service = ServerService::new(state.service_context());
    let response = service.rotate_invite_code(profile.id, server_id).await?;
    Ok(Json(response))
}
