//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{channels, conversations, health, invites, members, profile, servers};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(server_routes())
        .merge(invite_routes())
        .merge(conversation_routes())
}

/// Caller-centric routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/@me", get(profile::get_current_profile))
        .route("/profiles/@me/servers", get(profile::get_current_profile_servers))
        .route("/profiles/@me/setup", get(profile::get_setup))
}

/// Server routes
fn server_routes() -> Router<AppState> {
    Router::new()
        // Server CRUD
        .route("/servers", post(servers::create_server))
        .route(
            "/servers/:server_id",
            get(servers::get_server)
                .patch(servers::update_server)
                .delete(servers::delete_server),
        )
        .route("/servers/:server_id/invite-code", post(servers::rotate_invite_code))
        // Server members
        .route(
            "/servers/:server_id/members/@me",
            get(members::get_current_member).delete(members::leave_server),
        )
        .route(
            "/servers/:server_id/members/:member_id",
            patch(members::update_member_role).delete(members::kick_member),
        )
        // Server channels
        .route("/servers/:server_id/channels", post(channels::create_channel))
        .route(
            "/servers/:server_id/channels/:channel_id",
            patch(channels::update_channel).delete(channels::delete_channel),
        )
}

/// Invite routes
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invites/:invite_code",
            get(invites::get_existing_server).post(invites::join_through_invite),
        )
        .route("/invite-flow", get(invites::resolve_invite))
}

/// Conversation routes
fn conversation_routes() -> Router<AppState> {
    Router::new().route(
        "/conversations",
        get(conversations::find_conversation).post(conversations::create_conversation),
    )
}
