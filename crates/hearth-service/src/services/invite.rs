//! Invite service
//!
//! Invite codes are redeemed with a single guarded insert. Redeeming the same
//! code twice, or concurrently, yields one membership.

use hearth_core::entities::{Identity, Server};
use hearth_core::{DomainError, InviteCode, InviteRedemption, MemberId, ProfileId};
use tracing::{debug, info, instrument};

use crate::dto::{InviteResolutionResponse, ServerResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::IdentityService;

/// Terminal state of following an invite link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// No session; send the caller to sign in
    SignInRequired,
    /// No usable code; send the caller home
    Home,
    /// Caller was already a member, nothing changed
    AlreadyMember(Server),
    /// Caller was added as a GUEST
    Joined(Server),
    /// No server carries the code
    NotFound,
}

impl InviteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignInRequired => "SIGN_IN",
            Self::Home => "HOME",
            Self::AlreadyMember(_) => "ALREADY_MEMBER",
            Self::Joined(_) => "JOINED",
            Self::NotFound => "NOT_FOUND",
        }
    }

    /// Client route to navigate to, if any
    pub fn redirect(&self) -> Option<String> {
        match self {
            Self::SignInRequired => Some("/sign-in".to_string()),
            Self::Home => Some("/".to_string()),
            Self::AlreadyMember(server) | Self::Joined(server) => {
                Some(format!("/servers/{}", server.id))
            }
            Self::NotFound => None,
        }
    }

    pub fn server(&self) -> Option<&Server> {
        match self {
            Self::AlreadyMember(server) | Self::Joined(server) => Some(server),
            _ => None,
        }
    }
}

impl From<InviteOutcome> for InviteResolutionResponse {
    fn from(outcome: InviteOutcome) -> Self {
        Self {
            outcome: outcome.as_str(),
            redirect: outcome.redirect(),
            server: outcome.server().map(ServerResponse::from),
        }
    }
}

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Server reachable through this code that already lists the caller
    ///
    /// A malformed code matches nothing.
    #[instrument(skip(self, raw_code))]
    pub async fn existing_server(
        &self,
        caller: ProfileId,
        raw_code: &str,
    ) -> ServiceResult<Option<ServerResponse>> {
        let Ok(code) = InviteCode::parse(raw_code) else {
            debug!("Malformed invite code");
            return Ok(None);
        };

        let server = self
            .ctx
            .server_repo()
            .find_by_invite_for_member(&code, caller)
            .await?;

        Ok(server.as_ref().map(ServerResponse::from))
    }

    /// Redeem an invite code, joining as GUEST unless already a member
    #[instrument(skip(self, raw_code))]
    pub async fn join(&self, caller: ProfileId, raw_code: &str) -> ServiceResult<ServerResponse> {
        let code = InviteCode::parse(raw_code)
            .map_err(|_| ServiceError::bad_request("Malformed invite code"))?;

        let redemption = self
            .redeem(caller, &code)
            .await?
            .ok_or(DomainError::InviteNotFound)?;

        Ok(ServerResponse::from(&redemption.server))
    }

    /// Walk the invite flow for whoever followed the link
    #[instrument(skip(self, identity, raw_code))]
    pub async fn resolve(
        &self,
        identity: Option<&Identity>,
        raw_code: Option<&str>,
    ) -> ServiceResult<InviteOutcome> {
        let profile = match IdentityService::new(self.ctx).resolve_profile(identity).await {
            Ok(profile) => profile,
            Err(ServiceError::Unauthenticated) => return Ok(InviteOutcome::SignInRequired),
            Err(e) => return Err(e),
        };

        let Some(code) = raw_code.and_then(|raw| InviteCode::parse(raw).ok()) else {
            debug!(profile_id = %profile.id, "Invite without usable code");
            return Ok(InviteOutcome::Home);
        };

        if let Some(server) = self
            .ctx
            .server_repo()
            .find_by_invite_for_member(&code, profile.id)
            .await?
        {
            debug!(server_id = %server.id, profile_id = %profile.id, "Already a member");
            return Ok(InviteOutcome::AlreadyMember(server));
        }

        Ok(match self.redeem(profile.id, &code).await? {
            Some(redemption) if redemption.joined => InviteOutcome::Joined(redemption.server),
            Some(redemption) => InviteOutcome::AlreadyMember(redemption.server),
            None => InviteOutcome::NotFound,
        })
    }

    async fn redeem(
        &self,
        caller: ProfileId,
        code: &InviteCode,
    ) -> ServiceResult<Option<InviteRedemption>> {
        let redemption = self
            .ctx
            .server_repo()
            .join_by_invite(code, MemberId::generate(), caller)
            .await?;

        match &redemption {
            Some(r) if r.joined => {
                info!(server_id = %r.server.id, profile_id = %caller, "Joined server through invite");
            }
            Some(r) => {
                debug!(server_id = %r.server.id, profile_id = %caller, "Invite redeemed by existing member");
            }
            None => debug!(profile_id = %caller, "Invite code matched no server"),
        }

        Ok(redemption)
    }
}
