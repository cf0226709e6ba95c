//! Invite handlers
//!
//! Endpoints for looking up, redeeming and following invite links.

use axum::{
    extract::{Query, State},
    Json,
};
use hearth_service::{InviteResolutionResponse, InviteService, ServerResponse};
use serde::Deserialize;

use crate::extractors::{CurrentProfile, InviteCodePath, OptionalAuthUser, ParsedPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Query for the invite flow; the code may be missing
#[derive(Debug, Deserialize)]
pub struct ResolveInviteQuery {
    pub code: Option<String>,
}

/// Server behind the code if the caller is already a member, else null
///
/// GET /invites/{invite_code}
pub async fn get_existing_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<InviteCodePath>,
) -> ApiResult<Json<Option<ServerResponse>>> {
    let service = InviteService::new(state.service_context());
    let response = service.existing_server(profile.id, path.code()).await?;
    Ok(Json(response))
}

/// Join the server behind the code
///
/// POST /invites/{invite_code}
pub async fn join_through_invite(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ParsedPath(path): ParsedPath<InviteCodePath>,
) -> ApiResult<Json<ServerResponse>> {
    let service = InviteService::new(state.service_context());
    let response = service.join(profile.id, path.code()).await?;
    Ok(Json(response))
}

/// Follow an invite link, signed in or not
///
/// GET /invite-flow?code={invite_code}
pub async fn resolve_invite(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<ResolveInviteQuery>,
) -> ApiResult<Json<InviteResolutionResponse>> {
    let service = InviteService::new(state.service_context());
    let outcome = service
        .resolve(auth.identity(), query.code.as_deref())
        .await?;
    Ok(Json(InviteResolutionResponse::from(outcome)))
}
