//! Service context - dependency container for services
//!
//! Holds all repositories and the session verifier needed by services.

use std::sync::Arc;

use hearth_common::SessionVerifier;
use hearth_core::traits::{
    ChannelRepository, ConversationRepository, MemberRepository, ProfileRepository,
    ServerRepository, StoreHealth,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories are trait objects so the same services run against
/// PostgreSQL in production and an in-memory store in tests.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    server_repo: Arc<dyn ServerRepository>,
    member_repo: Arc<dyn MemberRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,

    // Infrastructure
    store_health: Arc<dyn StoreHealth>,
    session_verifier: Arc<SessionVerifier>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        server_repo: Arc<dyn ServerRepository>,
        member_repo: Arc<dyn MemberRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        store_health: Arc<dyn StoreHealth>,
        session_verifier: Arc<SessionVerifier>,
    ) -> Self {
        Self {
            profile_repo,
            server_repo,
            member_repo,
            channel_repo,
            conversation_repo,
            store_health,
            session_verifier,
        }
    }

    // === Repositories ===

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the server repository
    pub fn server_repo(&self) -> &dyn ServerRepository {
        self.server_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    // === Infrastructure ===

    /// Get the backing store health probe
    pub fn store_health(&self) -> &dyn StoreHealth {
        self.store_health.as_ref()
    }

    /// Get the session token verifier
    pub fn session_verifier(&self) -> &SessionVerifier {
        self.session_verifier.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("session_verifier", &self.session_verifier)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    server_repo: Option<Arc<dyn ServerRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    store_health: Option<Arc<dyn StoreHealth>>,
    session_verifier: Option<Arc<SessionVerifier>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn server_repo(mut self, repo: Arc<dyn ServerRepository>) -> Self {
        self.server_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn store_health(mut self, health: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(health);
        self
    }

    pub fn session_verifier(mut self, verifier: Arc<SessionVerifier>) -> Self {
        self.session_verifier = Some(verifier);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.profile_repo.ok_or_else(|| missing("profile_repo"))?,
            self.server_repo.ok_or_else(|| missing("server_repo"))?,
            self.member_repo.ok_or_else(|| missing("member_repo"))?,
            self.channel_repo.ok_or_else(|| missing("channel_repo"))?,
            self.conversation_repo.ok_or_else(|| missing("conversation_repo"))?,
            self.store_health.ok_or_else(|| missing("store_health"))?,
            self.session_verifier.ok_or_else(|| missing("session_verifier"))?,
        ))
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
