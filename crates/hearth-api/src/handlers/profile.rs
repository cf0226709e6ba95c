//! Profile handlers
//!
//! Endpoints about the caller: their profile, their servers and where the
//! setup page should send them.

use axum::{extract::State, Json};
use hearth_service::{ProfileResponse, ServerResponse, ServerService, SetupResponse};

use crate::extractors::CurrentProfile;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile, creating it on first access
///
/// GET /profiles/@me
pub async fn get_current_profile(CurrentProfile(profile): CurrentProfile) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(profile))
}

/// List the servers the caller belongs to
///
/// GET /profiles/@me/servers
pub async fn get_current_profile_servers(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
) -> ApiResult<Json<Vec<ServerResponse>>> {
    let service = ServerService::new(state.service_context());
    let response = service.list_servers(profile.id).await?;
    Ok(Json(response))
}

/// Setup redirect: first server or the create-server prompt
///
/// GET /profiles/@me/setup
pub async fn get_setup(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
) -> ApiResult<Json<SetupResponse>> {
    let service = ServerService::new(state.service_context());
    let response = service.find_first_server(profile.id).await?;
    Ok(Json(response))
}
