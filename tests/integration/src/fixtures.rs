//! Test fixtures
//!
//! A service context wired to the in-memory store, plus helpers that mint
//! session tokens and walk common setup flows through the real services.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use hearth_common::{AppConfig, SessionClaims, SessionVerifier};
use hearth_core::entities::{Identity, Member, Profile};
use hearth_core::{MemberRole, ServerId};
use hearth_service::{
    CreateServerRequest, IdentityService, InviteService, MemberService, ServerResponse,
    ServerService, ServiceContext, ServiceContextBuilder,
};

use crate::memory::MemoryStore;

/// Shared secret the test verifier signs and checks tokens with
pub const TEST_SESSION_SECRET: &str = "integration-test-session-secret";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Identity with a unique external id and a display name
pub fn unique_identity(name: &str) -> Identity {
    Identity {
        user_id: format!("user_{}", unique_suffix()),
        name: Some(name.to_string()),
        image_url: None,
        email: Some(format!("{}@example.com", name.to_lowercase())),
    }
}

/// Session verifier configured with [`TEST_SESSION_SECRET`]
pub fn test_verifier() -> SessionVerifier {
    SessionVerifier::new(TEST_SESSION_SECRET, None, 0)
}

/// Configuration for an API under test; no database is contacted
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| {
        let value = match key {
            "DATABASE_URL" => "postgres://unused@localhost/hearth_test",
            "SESSION_SECRET" => TEST_SESSION_SECRET,
            "RATE_LIMIT_REQUESTS_PER_SECOND" => "1000",
            "RATE_LIMIT_BURST" => "1000",
            "REQUEST_TIMEOUT_SECS" => "10",
            _ => return None,
        };
        Some(value.to_string())
    })?;
    Ok(config)
}

/// Services over a fresh in-memory store
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub ctx: ServiceContext,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        let store = MemoryStore::new();
        let ctx = ServiceContextBuilder::new()
            .profile_repo(store.clone())
            .server_repo(store.clone())
            .member_repo(store.clone())
            .channel_repo(store.clone())
            .conversation_repo(store.clone())
            .store_health(store.clone())
            .session_verifier(Arc::new(test_verifier()))
            .build()?;

        Ok(Self { store, ctx })
    }

    /// Provision a profile the way the first authenticated request does
    pub async fn profile(&self, name: &str) -> Result<Profile> {
        let identity = unique_identity(name);
        let profile = IdentityService::new(&self.ctx)
            .resolve_profile(Some(&identity))
            .await?;
        Ok(profile)
    }

    /// Create a server owned by `owner`
    pub async fn server(&self, owner: &Profile, name: &str) -> Result<ServerResponse> {
        let request = CreateServerRequest {
            name: name.to_string(),
            image_url: "https://example.com/server.png".to_string(),
        };
        let server = ServerService::new(&self.ctx)
            .create_server(owner.id, request)
            .await?;
        Ok(server)
    }

    /// Join `server` through its invite code and return the new membership
    pub async fn join(&self, profile: &Profile, server: &ServerResponse) -> Result<Member> {
        InviteService::new(&self.ctx)
            .join(profile.id, &server.invite_code)
            .await?;
        self.member(profile, server.id).await
    }

    /// Join and then have the owner promote the membership
    pub async fn join_as(
        &self,
        owner: &Profile,
        profile: &Profile,
        server: &ServerResponse,
        role: MemberRole,
    ) -> Result<Member> {
        let member = self.join(profile, server).await?;
        MemberService::new(&self.ctx)
            .change_role(owner.id, server.id, member.id, role)
            .await?;
        self.member(profile, server.id).await
    }

    /// Current membership of `profile` in a server
    pub async fn member(&self, profile: &Profile, server_id: ServerId) -> Result<Member> {
        self.store
            .members_of(server_id)
            .into_iter()
            .find(|m| m.profile_id == profile.id)
            .ok_or_else(|| anyhow::anyhow!("{} is not a member of {server_id}", profile.name))
    }
}

/// Sign a session token for `identity` with the test secret
pub fn token_for(identity: &Identity) -> Result<String> {
    let mut claims = SessionClaims::new(identity.user_id.clone(), Duration::hours(1));
    claims.name.clone_from(&identity.name);
    claims.email.clone_from(&identity.email);
    claims.picture.clone_from(&identity.image_url);
    Ok(test_verifier().issue(&claims)?)
}
