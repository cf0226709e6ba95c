//! Identity service
//!
//! Turns a verified session into the caller's Profile, provisioning the
//! Profile the first time an identity is seen.

use hearth_core::entities::{Identity, Profile};
use hearth_core::ProfileId;
use tracing::{debug, info, instrument, warn};

use crate::dto::ProfileResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify a bearer token and return the identity it asserts
    pub fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        self.ctx.session_verifier().authenticate(token).map_err(|e| {
            warn!(error = %e, "Rejected session token");
            ServiceError::from(e)
        })
    }

    /// Resolve the caller's Profile, creating it on first sight
    ///
    /// # Errors
    /// Returns `Unauthenticated` when there is no identity
    #[instrument(skip(self, identity), fields(user_id = tracing::field::Empty))]
    pub async fn resolve_profile(&self, identity: Option<&Identity>) -> ServiceResult<Profile> {
        let identity = identity.ok_or(ServiceError::Unauthenticated)?;
        tracing::Span::current().record("user_id", identity.user_id.as_str());

        if let Some(profile) = self
            .ctx
            .profile_repo()
            .find_by_user_id(&identity.user_id)
            .await?
        {
            debug!(profile_id = %profile.id, "Resolved existing profile");
            return Ok(profile);
        }

        let candidate = identity.to_profile(ProfileId::generate());
        let profile = self.ctx.profile_repo().create_or_get(&candidate).await?;

        if profile.id == candidate.id {
            info!(profile_id = %profile.id, "Profile created");
        }

        Ok(profile)
    }

    /// Resolve the caller's Profile as a response DTO
    pub async fn current_profile(&self, identity: Option<&Identity>) -> ServiceResult<ProfileResponse> {
        self.resolve_profile(identity).await.map(ProfileResponse::from)
    }
}
