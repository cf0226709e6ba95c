//! API Integration Tests
//!
//! Spawn the full router over the in-memory store and talk to it over HTTP.
//! Tokens are signed with the test session secret.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, token_for, unique_identity, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// A signed-in caller
struct Caller {
    token: String,
}

impl Caller {
    fn new(name: &str) -> Self {
        let identity = unique_identity(name);
        Self {
            token: token_for(&identity).expect("Failed to sign token"),
        }
    }
}

async fn create_server(server: &TestServer, caller: &Caller, name: &str) -> Value {
    let body = json!({ "name": name, "imageUrl": "https://example.com/icon.png" });
    let response = server
        .post_auth("/api/v1/servers", &caller.token, &body)
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("Failed to create server")
}

async fn join(server: &TestServer, caller: &Caller, invite_code: &str) -> Value {
    let path = format!("/api/v1/invites/{invite_code}");
    let response = server
        .post_auth(&path, &caller.token, &json!({}))
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::OK).await.expect("Failed to join")
}

async fn current_member(server: &TestServer, caller: &Caller, server_id: &str) -> Value {
    let path = format!("/api/v1/servers/{server_id}/members/@me");
    let response = server.get_auth(&path, &caller.token).await.expect("Request failed");
    assert_json(response, StatusCode::OK).await.expect("Failed to load member")
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/profiles/@me").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error_code(&body), "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/v1/profiles/@me", "not-a-token")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_profile_is_provisioned_on_first_request() {
    let server = TestServer::start().await.expect("Failed to start server");
    let identity = unique_identity("Alice");
    let token = token_for(&identity).unwrap();

    let response = server.get_auth("/api/v1/profiles/@me", &token).await.unwrap();
    let first: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first["userId"], identity.user_id.as_str());
    assert_eq!(first["name"], "Alice");

    let response = server.get_auth("/api/v1/profiles/@me", &token).await.unwrap();
    let second: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first["id"], second["id"]);
    assert_eq!(server.store.profile_count(), 1);
}

// ============================================================================
// Server Tests
// ============================================================================

#[tokio::test]
async fn test_create_server() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");

    let created = create_server(&server, &owner, "Test").await;
    assert_eq!(created["name"], "Test");
    assert!(created["inviteCode"].is_string());

    let server_id = created["id"].as_str().unwrap();
    let path = format!("/api/v1/servers/{server_id}");
    let response = server.get_auth(&path, &owner.token).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let channels = detail["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["name"], "general");
    assert_eq!(channels[0]["type"], "TEXT");

    let members = detail["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "ADMIN");
    assert_eq!(members[0]["profileId"], created["profileId"]);
}

#[tokio::test]
async fn test_create_server_validation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");

    let body = json!({ "name": "   ", "imageUrl": "https://example.com/icon.png" });
    let response = server
        .post_auth("/api/v1/servers", &owner.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(server.store.server_count(), 0);
}

#[tokio::test]
async fn test_setup_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");

    let response = server.get_auth("/api/v1/profiles/@me/setup", &owner.token).await.unwrap();
    let setup: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(setup["action"], "CREATE_FIRST_SERVER");

    let created = create_server(&server, &owner, "First").await;

    let response = server.get_auth("/api/v1/profiles/@me/setup", &owner.token).await.unwrap();
    let setup: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(setup["action"], "REDIRECT");
    assert_eq!(setup["serverId"], created["id"]);

    let response = server
        .get_auth("/api/v1/profiles/@me/servers", &owner.token)
        .await
        .unwrap();
    let servers: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(servers.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_non_owner_cannot_delete_server() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");

    let created = create_server(&server, &owner, "Keep").await;
    join(&server, &guest, created["inviteCode"].as_str().unwrap()).await;

    let path = format!("/api/v1/servers/{}", created["id"].as_str().unwrap());
    let response = server.delete_auth(&path, &guest.token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error_code(&body), "NOT_SERVER_OWNER");
    assert_eq!(server.store.server_count(), 1);

    let response = server.delete_auth(&path, &owner.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(server.store.server_count(), 0);
}

#[tokio::test]
async fn test_rotate_invite_code() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let created = create_server(&server, &owner, "Rotating").await;
    let old_code = created["inviteCode"].as_str().unwrap();

    let path = format!("/api/v1/servers/{}/invite-code", created["id"].as_str().unwrap());
    let response = server.post_auth(&path, &owner.token, &json!({})).await.unwrap();
    let rotated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated["inviteCode"], old_code);

    let response = server
        .get_auth(&format!("/api/v1/invites/{old_code}"), &owner.token)
        .await
        .unwrap();
    let existing: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(existing.is_null());
}

#[tokio::test]
async fn test_malformed_server_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");

    let response = server
        .get_auth("/api/v1/servers/not-a-uuid", &owner.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error_code(&body), "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_general_channel_name_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("P1");
    let other = Caller::new("P2");
    let created = create_server(&server, &owner, "Test").await;

    let path = format!("/api/v1/servers/{}/channels", created["id"].as_str().unwrap());
    let body = json!({ "name": "general", "type": "TEXT" });
    let response = server.post_auth(&path, &other.token, &body).await.unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error_code(&error), "CHANNEL_NAME_RESERVED");
}

#[tokio::test]
async fn test_channel_lifecycle() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");
    let created = create_server(&server, &owner, "Channels").await;
    let server_id = created["id"].as_str().unwrap();
    join(&server, &guest, created["inviteCode"].as_str().unwrap()).await;

    let path = format!("/api/v1/servers/{server_id}/channels");
    let body = json!({ "name": "voice", "type": "AUDIO" });

    let response = server.post_auth(&path, &guest.token, &body).await.unwrap();
    let error: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error_code(&error), "MISSING_PERMISSIONS");

    let response = server.post_auth(&path, &owner.token, &body).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let channels = detail["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 2);

    let general_id = channels
        .iter()
        .find(|c| c["name"] == "general")
        .and_then(|c| c["id"].as_str())
        .unwrap();
    let voice_id = channels
        .iter()
        .find(|c| c["name"] == "voice")
        .and_then(|c| c["id"].as_str())
        .unwrap();

    let general_path = format!("/api/v1/servers/{server_id}/channels/{general_id}");
    let response = server.delete_auth(&general_path, &owner.token).await.unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error_code(&error), "GENERAL_CHANNEL_IMMUTABLE");

    let voice_path = format!("/api/v1/servers/{server_id}/channels/{voice_id}");
    let rename = json!({ "name": "stage", "type": "VIDEO" });
    let response = server.patch_auth(&voice_path, &owner.token, &rename).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let stage = detail["channels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == voice_id)
        .unwrap();
    assert_eq!(stage["name"], "stage");
    assert_eq!(stage["type"], "VIDEO");

    let response = server.delete_auth(&voice_path, &owner.token).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["channels"].as_array().map(Vec::len), Some(1));
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_guest_cannot_kick() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("P1");
    let p2 = Caller::new("P2");
    let p3 = Caller::new("P3");
    let created = create_server(&server, &owner, "Test").await;
    let server_id = created["id"].as_str().unwrap();
    let code = created["inviteCode"].as_str().unwrap();
    join(&server, &p2, code).await;
    join(&server, &p3, code).await;

    let target = current_member(&server, &p3, server_id).await;
    let path = format!("/api/v1/servers/{server_id}/members/{}", target["id"].as_str().unwrap());

    let response = server.delete_auth(&path, &p2.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let stored_id = server_id.parse().expect("Invalid server id");
    assert_eq!(server.store.members_of(stored_id).len(), 3);
}

#[tokio::test]
async fn test_owner_manages_roles() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");
    let created = create_server(&server, &owner, "Roles").await;
    let server_id = created["id"].as_str().unwrap();
    join(&server, &guest, created["inviteCode"].as_str().unwrap()).await;

    let target = current_member(&server, &guest, server_id).await;
    assert_eq!(target["role"], "GUEST");
    assert_eq!(target["profile"]["id"], target["profileId"]);
    assert!(target["profile"]["name"].is_string());
    let path = format!("/api/v1/servers/{server_id}/members/{}", target["id"].as_str().unwrap());

    let response = server
        .patch_auth(&path, &owner.token, &json!({ "role": "MODERATOR" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let promoted = current_member(&server, &guest, server_id).await;
    assert_eq!(promoted["role"], "MODERATOR");

    let own = current_member(&server, &owner, server_id).await;
    let own_path = format!("/api/v1/servers/{server_id}/members/{}", own["id"].as_str().unwrap());
    let response = server.delete_auth(&own_path, &owner.token).await.unwrap();
    let error: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error_code(&error), "CANNOT_TARGET_SELF");

    let response = server.delete_auth(&path, &owner.token).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["members"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_leave_server() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");
    let created = create_server(&server, &owner, "Leaving").await;
    let server_id = created["id"].as_str().unwrap();
    join(&server, &guest, created["inviteCode"].as_str().unwrap()).await;

    let path = format!("/api/v1/servers/{server_id}/members/@me");

    let response = server.delete_auth(&path, &owner.token).await.unwrap();
    let error: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error_code(&error), "OWNER_CANNOT_LEAVE");

    let response = server.delete_auth(&path, &guest.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(current_member(&server, &guest, server_id).await.is_null());
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_join_twice_creates_one_member() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");
    let created = create_server(&server, &owner, "Twice").await;
    let code = created["inviteCode"].as_str().unwrap();

    let first = join(&server, &guest, code).await;
    let second = join(&server, &guest, code).await;
    assert_eq!(first["id"], second["id"]);

    let path = format!("/api/v1/servers/{}", created["id"].as_str().unwrap());
    let response = server.get_auth(&path, &guest.token).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["members"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_invite_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let visitor = Caller::new("Visitor");
    let created = create_server(&server, &owner, "Flow").await;
    let code = created["inviteCode"].as_str().unwrap();
    let query = [("code", code)];

    let response = server.get("/api/v1/invite-flow").await.unwrap();
    let outcome: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome["outcome"], "SIGN_IN");
    assert_eq!(outcome["redirect"], "/sign-in");

    let response = server
        .get_auth("/api/v1/invite-flow", &visitor.token)
        .await
        .unwrap();
    let outcome: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome["outcome"], "HOME");

    let response = server
        .get_auth_query("/api/v1/invite-flow", &visitor.token, &query)
        .await
        .unwrap();
    let outcome: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome["outcome"], "JOINED");
    assert_eq!(outcome["server"]["id"], created["id"]);

    let response = server
        .get_auth_query("/api/v1/invite-flow", &visitor.token, &query)
        .await
        .unwrap();
    let outcome: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome["outcome"], "ALREADY_MEMBER");

    let missing = [("code", "00000000-0000-4000-8000-000000000000")];
    let response = server
        .get_auth_query("/api/v1/invite-flow", &visitor.token, &missing)
        .await
        .unwrap();
    let outcome: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome["outcome"], "NOT_FOUND");
    assert!(outcome.get("redirect").is_none());
}

// ============================================================================
// Conversation Tests
// ============================================================================

#[tokio::test]
async fn test_conversation_find_or_create() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = Caller::new("Owner");
    let guest = Caller::new("Guest");
    let created = create_server(&server, &owner, "Chat").await;
    let server_id = created["id"].as_str().unwrap();
    join(&server, &guest, created["inviteCode"].as_str().unwrap()).await;

    let a = current_member(&server, &owner, server_id).await;
    let b = current_member(&server, &guest, server_id).await;
    let a_id = a["id"].as_str().unwrap();
    let b_id = b["id"].as_str().unwrap();

    let forward = [("memberOneId", a_id), ("memberTwoId", b_id)];
    let response = server
        .get_auth_query("/api/v1/conversations", &owner.token, &forward)
        .await
        .unwrap();
    let found: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(found.is_null());

    let body = json!({ "memberOneId": b_id, "memberTwoId": a_id });
    let response = server
        .post_auth("/api/v1/conversations", &guest.token, &body)
        .await
        .unwrap();
    let conversation: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversation["memberOneId"], b_id);
    assert!(conversation["memberTwo"]["profile"]["name"].is_string());

    let response = server
        .get_auth_query("/api/v1/conversations", &owner.token, &forward)
        .await
        .unwrap();
    let found: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found["id"], conversation["id"]);

    let body = json!({ "memberOneId": a_id, "memberTwoId": a_id });
    let response = server
        .post_auth("/api/v1/conversations", &owner.token, &body)
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error_code(&error), "SELF_CONVERSATION");
}
