//! Conversation handlers
//!
//! Find-or-create for 1:1 conversations between members.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use hearth_service::{ConversationRequest, ConversationResponse, ConversationService};

use crate::extractors::{CurrentProfile, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Find the conversation between two members, or null
///
/// GET /conversations?memberOneId={id}&memberTwoId={id}
pub async fn find_conversation(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    query: Result<Query<ConversationRequest>, QueryRejection>,
) -> ApiResult<Json<Option<ConversationResponse>>> {
    let Query(request) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .find_conversation(profile.id, request.member_one_id, request.member_two_id)
        .await?;
    Ok(Json(response))
}

/// Get the conversation between two members, creating it if needed
///
/// POST /conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ValidatedJson(request): ValidatedJson<ConversationRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let service = ConversationService::new(state.service_context());
    let response = service
        .get_or_create(profile.id, request.member_one_id, request.member_two_id)
        .await?;
    Ok(Json(response))
}
